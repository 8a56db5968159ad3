/// Validation failures that block a form submission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("capacity must be a positive number")]
    NonPositiveCapacity,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("a room must be selected")]
    MissingRoom,
}
