pub mod session;
pub mod startup;

pub use session::{Session, SessionReport, SessionState};
pub use startup::{bootstrap, AppContext};
