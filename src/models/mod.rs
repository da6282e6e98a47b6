pub mod category;
pub mod session;
pub mod task;
pub mod theme;
pub mod user;

pub use category::{Category, CategoryRef};
pub use session::{Session, SessionPatch};
pub use task::{NewTask, Task, TaskPatch};
pub use theme::Theme;
pub use user::User;
