mod admin;
pub use admin::{AdminDashboard, ProvidersTable, UsersTable};

mod dashboard;
pub use dashboard::Dashboard;

mod home;
pub use home::Home;

mod login;
pub use login::{Login, LoginAdmin};

mod not_found;
pub use not_found::NotFound;

mod register;
pub use register::Register;
