//! Quick Settings panel
//!
//! Pulled down from the status bar. Shows the quick toggles and the
//! brightness slider; nothing here touches real hardware.

use super::ShellError;

/// Quick toggle button definition
#[derive(Debug, Clone)]
pub struct QuickToggle {
    pub id: String,
    pub name: String,
    pub icon: &'static str,
    pub enabled: bool,
}

impl QuickToggle {
    pub fn new(id: &str, name: &str, icon: &'static str, enabled: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon,
            enabled,
        }
    }

    /// `[W Wi-Fi]` when on, ` W Wi-Fi ` when off
    pub fn render(&self) -> String {
        if self.enabled {
            format!("[{} {}]", self.icon, self.name)
        } else {
            format!(" {} {} ", self.icon, self.name)
        }
    }
}

/// Default quick toggles
pub fn default_toggles() -> Vec<QuickToggle> {
    vec![
        QuickToggle::new("wifi", "Wi-Fi", "W", true),
        QuickToggle::new("bluetooth", "Bluetooth", "B", true),
        QuickToggle::new("dark", "Dark Mode", "D", true),
        QuickToggle::new("ai", "AI Core", "A", true),
        QuickToggle::new("torch", "Torch", "T", false),
        QuickToggle::new("data", "Data", "G", true),
    ]
}

/// Quick settings panel state
#[derive(Debug, Clone)]
pub struct QuickSettingsPanel {
    pub open: bool,
    pub toggles: Vec<QuickToggle>,
    pub brightness: f32,
}

impl QuickSettingsPanel {
    pub fn new() -> Self {
        Self {
            open: false,
            toggles: default_toggles(),
            brightness: 0.7,
        }
    }

    /// Flip a toggle by id, returning its new state
    pub fn toggle(&mut self, id: &str) -> Result<bool, ShellError> {
        let toggle = self
            .toggles
            .iter_mut()
            .find(|t| t.id.eq_ignore_ascii_case(id) || t.name.eq_ignore_ascii_case(id))
            .ok_or_else(|| ShellError::UnknownQuickSetting(id.to_string()))?;
        toggle.enabled = !toggle.enabled;
        tracing::info!("Quick setting {} -> {}", toggle.id, toggle.enabled);
        Ok(toggle.enabled)
    }

    pub fn is_enabled(&self, id: &str) -> Option<bool> {
        self.toggles.iter().find(|t| t.id == id).map(|t| t.enabled)
    }

    /// Set brightness (0.0-1.0)
    pub fn set_brightness(&mut self, value: f32) {
        self.brightness = value.clamp(0.05, 1.0); // Minimum 5% to avoid black screen
    }

    /// Panel lines for the frame
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec!["Quick Settings".to_string()];
        for row in self.toggles.chunks(4) {
            lines.push(row.iter().map(QuickToggle::render).collect::<Vec<_>>().join(" "));
        }
        let filled = (self.brightness * 20.0).round() as usize;
        lines.push(format!(
            "☀ {}{} {:>3}%",
            "█".repeat(filled),
            "░".repeat(20 - filled.min(20)),
            (self.brightness * 100.0).round() as u32
        ));
        lines
    }
}

impl Default for QuickSettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let panel = QuickSettingsPanel::new();
        assert!(!panel.open);
        assert_eq!(panel.toggles.len(), 6);
        assert_eq!(panel.is_enabled("torch"), Some(false));
        assert_eq!(panel.is_enabled("wifi"), Some(true));
    }

    #[test]
    fn test_toggle_by_id_or_name() {
        let mut panel = QuickSettingsPanel::new();
        assert_eq!(panel.toggle("torch").unwrap(), true);
        assert_eq!(panel.toggle("Wi-Fi").unwrap(), false);
        assert!(matches!(panel.toggle("nfc"), Err(ShellError::UnknownQuickSetting(_))));
    }

    #[test]
    fn test_brightness_clamped() {
        let mut panel = QuickSettingsPanel::new();
        panel.set_brightness(0.0);
        assert!((panel.brightness - 0.05).abs() < f32::EPSILON);
        panel.set_brightness(3.0);
        assert!((panel.brightness - 1.0).abs() < f32::EPSILON);
        assert!(panel.render().last().unwrap().ends_with("100%"));
    }
}
