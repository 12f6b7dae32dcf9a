//! Recents - card list of tracked apps with split-screen and close buttons
//!
//! The card list is fixed by the registry; apps are not suspended or resumed,
//! closing any card (or "Close All") just goes home.

use super::registry::ScreenRegistry;
use super::Screen;

/// One card in the recents list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentCard {
    pub screen: Screen,
    pub title: &'static str,
    pub icon: &'static str,
}

/// Recents cards in display order
pub fn cards(registry: &ScreenRegistry) -> Vec<RecentCard> {
    registry
        .recents()
        .map(|entry| RecentCard {
            screen: entry.screen,
            title: entry.label,
            icon: entry.icon,
        })
        .collect()
}

/// Resolve a card by 1-based position or by screen name
pub fn find_card(registry: &ScreenRegistry, target: &str) -> Option<RecentCard> {
    let cards = cards(registry);
    if let Ok(index) = target.trim().parse::<usize>() {
        return index.checked_sub(1).and_then(|i| cards.get(i).cloned());
    }
    let screen: Screen = target.parse().ok()?;
    cards.into_iter().find(|card| card.screen == screen)
}

/// Recents lines for the frame
pub fn render(registry: &ScreenRegistry) -> Vec<String> {
    let mut lines = vec!["Recent apps".to_string(), String::new()];
    for (i, card) in cards(registry).iter().enumerate() {
        lines.push(format!("{}. {} {:<12} [⧉ split] [x]", i + 1, card.icon, card.title));
    }
    lines.push(String::new());
    lines.push("            ( Close All )".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_card() {
        let registry = ScreenRegistry::default();
        assert_eq!(find_card(&registry, "1").map(|c| c.screen), Some(Screen::Messages));
        assert_eq!(find_card(&registry, "gallery").map(|c| c.screen), Some(Screen::Gallery));
        assert!(find_card(&registry, "0").is_none());
        assert!(find_card(&registry, "9").is_none());
        // Not tracked in recents
        assert!(find_card(&registry, "camera").is_none());
    }

    #[test]
    fn test_render_lists_all_cards() {
        let registry = ScreenRegistry::default();
        let lines = render(&registry);
        assert!(lines.iter().any(|l| l.starts_with("4. ")));
        assert!(lines.iter().any(|l| l.contains("Close All")));
    }
}
