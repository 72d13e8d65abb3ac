pub mod app_state;
pub mod buddy;
pub mod feedback;
pub mod invite;

pub use app_state::{AppState, Screen};
pub use buddy::{Buddy, WalkSummary};
pub use feedback::FeedbackPayload;
pub use invite::{Invite, InviteStatus, Outcome, WalkTime};
