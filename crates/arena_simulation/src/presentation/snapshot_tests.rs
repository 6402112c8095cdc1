//! Tests for HUD formatting and asset fallback.

#[cfg(test)]
mod tests {
    use crate::presentation::{AssetReadiness, FrameSnapshot, VisualKind};

    #[test]
    fn test_hud_text_matches_prototype_layout() {
        let snapshot = FrameSnapshot {
            score: 30,
            round: 2,
            live_enemy_count: 4,
            active_weapon_name: "Shotgun".into(),
            ammo: 5,
            max_ammo: 6,
            ..FrameSnapshot::default()
        };

        assert_eq!(snapshot.hud_text(), "Score: 30\nRound: 2\nEnemies: 4\nShotgun: 5/6");
    }

    #[test]
    fn test_hud_text_shows_reload() {
        let snapshot = FrameSnapshot {
            active_weapon_name: "Pistol".into(),
            max_ammo: 12,
            reloading: true,
            ..FrameSnapshot::default()
        };

        assert!(snapshot.hud_text().ends_with("Pistol: 0/12 [reloading]"));
    }

    #[test]
    fn test_missing_assets_fall_back() {
        let mut assets = AssetReadiness::default();
        assert_eq!(assets.visual(AssetReadiness::ENEMY_MODEL), VisualKind::Fallback);

        assets.mark(AssetReadiness::ENEMY_MODEL, true);
        assets.mark(AssetReadiness::WEAPON_MODEL, false);
        assert_eq!(assets.visual(AssetReadiness::ENEMY_MODEL), VisualKind::Model);
        assert_eq!(assets.visual(AssetReadiness::WEAPON_MODEL), VisualKind::Fallback);
    }
}
