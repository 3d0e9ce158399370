//! Where `preferences.json` lives: beside the `apfel` binary, so each copy of
//! the explorer keeps its own startup settings.

use std::path::PathBuf;

/// Folder holding the preferences file. Uses the current directory when the
/// executable path cannot be resolved, and `.` as a last resort.
pub fn settings_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        },
        Err(_) => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_dir_is_the_binary_folder() {
        let exe = std::env::current_exe().unwrap();
        assert_eq!(settings_dir(), exe.parent().unwrap());
    }
}
