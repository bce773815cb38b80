pub mod console_text;
pub mod elevate;
pub mod known_folder;
