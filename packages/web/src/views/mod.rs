mod app_layout;
pub use app_layout::AppLayout;

mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod send_feedback;
pub use send_feedback::SendFeedback;

mod received;
pub use received::ReceivedFeedback;

mod sent;
pub use sent::SentFeedback;

mod users;
pub use users::Users;

mod statistics;
pub use statistics::Statistics;

mod settings;
pub use settings::Settings;
