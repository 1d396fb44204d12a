use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("This action is reserved for the administrator")]
    AdminOnly,

    #[error("Client sessions may only access their own ledger")]
    Forbidden,

    #[error("The administrator must choose a client with --client")]
    ClientRequired,
}
