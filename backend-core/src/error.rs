/// Errors produced by the `backend-core` crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A create-user payload lacked a non-empty `name` or `email`.
    ///
    /// The display text is returned verbatim to clients.
    #[error("Name and email are required")]
    MissingUserFields,
}
