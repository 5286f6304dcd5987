pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{done, done_message, success, warn};
pub use progress::FileProgress;
pub use table::{summary_table, TableBuilder};
pub use theme::{theme, Theme};
