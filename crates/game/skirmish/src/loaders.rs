//! Session loader for TOML files.

use std::path::Path;

use anyhow::Context;

use crate::session::SessionConfig;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Loader for [`SessionConfig`] from TOML files.
///
/// Every table is optional; missing ones fall back to the defaults.
///
/// ```toml
/// max_frames = 120
/// script = ["shoot 2", "attack 1"]
///
/// [phases]
/// phases = ["RANGED_ATTACKS", "GENERAL", "MELEE_ATTACKS", "END_OF_TURN"]
/// fallback = "GENERAL"
///
/// [hero]
/// name = "Aria"
/// hp = 24
/// attack = 5
///
/// [[monsters]]
/// name = "Goblin"
/// kind = "brawler"
/// hp = 8
/// attack = 3
/// ```
pub struct SessionLoader;

impl SessionLoader {
    /// Load a session from a TOML file.
    pub fn load(path: &Path) -> LoadResult<SessionConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid session file {}", path.display()))
    }

    /// Parse a session from TOML text.
    pub fn parse(content: &str) -> LoadResult<SessionConfig> {
        let config: SessionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse session TOML: {}", e))?;

        if config.max_frames == 0 {
            anyhow::bail!("max_frames must be at least 1");
        }
        check_stats("hero", &config.hero.name, config.hero.hp, config.hero.attack)?;
        for monster in &config.monsters {
            check_stats("monster", &monster.name, monster.hp, monster.attack)?;
        }
        config
            .input()
            .map_err(|e| anyhow::anyhow!("Invalid script: {}", e))?;

        Ok(config)
    }
}

fn check_stats(role: &str, name: &str, hp: i32, attack: i32) -> LoadResult<()> {
    if hp <= 0 {
        anyhow::bail!("{} '{}' needs hp above 0, got {}", role, name, hp);
    }
    if attack < 0 {
        anyhow::bail!("{} '{}' has negative attack {}", role, name, attack);
    }
    Ok(())
}

fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use turn_animation::PhaseConfig;

    use super::*;
    use crate::npc::NpcKind;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(SessionLoader::parse("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = SessionLoader::parse(
            r#"
            max_frames = 50

            [phases]
            phases = ["GENERAL", "END_OF_TURN"]

            [hero]
            hp = 12

            [[monsters]]
            name = "Skeleton"
            kind = "archer"
            hp = 4
            attack = 1
            speed = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.max_frames, 50);
        assert_eq!(config.phases, PhaseConfig::new(["GENERAL", "END_OF_TURN"]));
        assert_eq!(config.phases.fallback_name(), Some("GENERAL"));
        assert_eq!((config.hero.name.as_str(), config.hero.hp), ("Hero", 12));
        assert_eq!(config.monsters.len(), 1);
        assert_eq!(config.monsters[0].kind, NpcKind::Archer);
        assert_eq!(config.monsters[0].speed, 50);
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(SessionLoader::parse("max_frames = 0").is_err());
        assert!(SessionLoader::parse(r#"script = ["fly 1"]"#).is_err());

        let unknown_kind = r#"
            [[monsters]]
            name = "Imp"
            kind = "wizard"
            hp = 1
            attack = 1
        "#;
        assert!(SessionLoader::parse(unknown_kind).is_err());
    }

    #[test]
    fn rejects_impossible_stats() {
        let dead_hero = "[hero]\nhp = 0";
        let err = SessionLoader::parse(dead_hero).unwrap_err();
        assert!(err.to_string().contains("hero 'Hero'"));

        let monster = |hp: i32, attack: i32| {
            format!(
                "[[monsters]]\nname = \"Imp\"\nkind = \"brawler\"\nhp = {hp}\nattack = {attack}"
            )
        };
        assert!(SessionLoader::parse(&monster(1, 0)).is_ok());
        assert!(SessionLoader::parse(&monster(-4, 1)).is_err());
        assert!(SessionLoader::parse(&monster(3, -1)).is_err());
        let err = SessionLoader::parse(&monster(3, i32::MIN)).unwrap_err();
        assert!(err.to_string().contains("monster 'Imp'"));
    }
}
