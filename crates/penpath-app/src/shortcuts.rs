//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    /// Ctrl, or Cmd on macOS.
    pub command: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: bool, description: &'static str) -> Self {
        Self {
            key,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl/Cmd+Z").
    pub fn format(&self) -> String {
        if self.command {
            format!("Ctrl/Cmd+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Enter", false, "Finish the current path"),
            Shortcut::new("Escape", false, "Finish the current path"),
            Shortcut::new("Z", true, "Remove the last placed point"),
            Shortcut::new("Click", false, "Place a corner point"),
            Shortcut::new("Drag", false, "Place a smooth point and pull its handles"),
        ]
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Pen Tool ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("Z", true, "Undo").format(), "Ctrl/Cmd+Z");
        assert_eq!(Shortcut::new("Enter", false, "Finish").format(), "Enter");
    }

    #[test]
    fn test_registry_lists_undo_and_finish() {
        let all = ShortcutRegistry::all();
        assert!(all.iter().any(|s| s.key == "Z" && s.command));
        assert!(all.iter().any(|s| s.key == "Enter"));
        assert!(all.iter().any(|s| s.key == "Escape"));
    }
}
