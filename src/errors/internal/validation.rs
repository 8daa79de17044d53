use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("At least one role is required")]
    EmptyRoleList,

    #[error("Unknown role: {name}")]
    UnknownRole { name: String },

    #[error("Field '{field}' must not be blank")]
    BlankField { field: &'static str },

    #[error("Field '{field}' must not be negative")]
    NegativeValue { field: &'static str },

    #[error("Nothing to update")]
    EmptyUpdate,

    #[error("Malformed request body: {message}")]
    MalformedBody { message: String },
}
