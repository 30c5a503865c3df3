/// Router Module Index
///
/// Splits the page host's routes by the check that runs before each page renders.
/// Access control is attached at the module level (via Axum layers) so a page cannot
/// be mounted without its guard by accident.

/// Pages and endpoints any visitor may reach: home, login, registration, health,
/// and the credential hand-off.
pub mod public;

/// Pages wrapped by the route guard layer (tracks listing, upload).
pub mod guarded;

/// The player page, whose loader performs its own credential check.
pub mod player;
