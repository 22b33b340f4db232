//! Small presentational building blocks shared by the pages.

mod alert;
pub use alert::{Alert, AlertKind};

mod category;
pub use category::{CategoryBadge, CategoryTabs};

mod feedback_card;
pub use feedback_card::FeedbackCard;

mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod stat_card;
pub use stat_card::StatCard;

mod spinner;
pub use spinner::Spinner;
