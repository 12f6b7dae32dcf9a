//! Lock screen - clock face, widgets and the tap-to-unlock area
//!
//! There is no authentication: any tap outside the clock unlocks. Tapping
//! the clock switches between the digital and analog faces.

/// Lock screen clock face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockClockStyle {
    #[default]
    Digital,
    Analog,
}

impl LockClockStyle {
    pub fn toggled(self) -> Self {
        match self {
            LockClockStyle::Digital => LockClockStyle::Analog,
            LockClockStyle::Analog => LockClockStyle::Digital,
        }
    }
}

/// Lock screen lines. `time` is the status bar clock, e.g. "8:30 AM".
pub fn render(time: &str, style: LockClockStyle, battery: u8) -> Vec<String> {
    let mut lines = vec!["🔒 Face ID".to_string(), String::new()];

    match style {
        LockClockStyle::Digital => {
            // Big clock shows the time without the AM/PM suffix
            let clock = time.split(' ').next().unwrap_or(time);
            lines.push(format!("      {}", clock));
            lines.push("      Tuesday, October 24".to_string());
        }
        LockClockStyle::Analog => {
            lines.push("       .-\"\"-.".to_string());
            lines.push("      /  |   \\".to_string());
            lines.push("      \\   \\  /".to_string());
            lines.push("       '-..-'".to_string());
        }
    }

    lines.push(String::new());
    lines.push(format!("🔋 {}%   🌤 25°C Sunny", battery));
    lines.push(String::new());
    lines.push("   ( tap to unlock )".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(LockClockStyle::Digital.toggled(), LockClockStyle::Analog);
        assert_eq!(LockClockStyle::Analog.toggled(), LockClockStyle::Digital);
    }

    #[test]
    fn test_digital_drops_suffix() {
        let lines = render("8:30 AM", LockClockStyle::Digital, 100);
        assert!(lines.iter().any(|l| l.trim() == "8:30"));
        assert!(lines.iter().any(|l| l.contains("100%")));
    }
}
