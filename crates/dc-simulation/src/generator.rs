//! Procedural dungeon generation.
//!
//! Generation happens in two steps. [`blueprint`] draws an archetype and
//! builds a themed, ordered list of encounter names together with a display
//! name; [`Blueprint::resolve`] looks every name up in the world's catalog.
//! City and lair blueprints shuffle everything except the boss, which always
//! comes last; open dungeons shuffle everything.

use dc_core::{Archetype, Dungeon, World};
use dc_mechanics::RandomSource;

use crate::error::{SimError, SimResult};

/// Places appended to every generated dungeon name.
pub const PLACES: &[&str] = &[
    "Khaz-Gorond",
    "Riverfell",
    "Limeneth",
    "Galoron",
    "Cheliax",
    "Lemarchand",
    "Calantha",
    "Almadris",
    "Sintharion",
    "Azmar",
    "Icemarch",
    "Lakeshore",
    "Stormwind",
    "Darkflight Pass",
    "Stonefell Peak",
];

const CITY_CHANCE: f64 = 0.35;
const LAIR_CHANCE: f64 = 0.35;

/// The monster species ruling a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitySpecies {
    /// Goblin warrens, chieftain boss.
    Goblin,
    /// Orc holds, warlord or shaman boss.
    Orc,
    /// Undead necropolis.
    Undead,
}

/// An unresolved dungeon: names only.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    /// The archetype drawn.
    pub archetype: Archetype,
    /// The ruling species for cities.
    pub city_species: Option<CitySpecies>,
    /// Display name.
    pub name: String,
    /// Encounter names in play order.
    pub names: Vec<String>,
    /// Monster encounters, boss included.
    pub regular_count: usize,
    /// Trap encounters.
    pub trap_count: usize,
}

impl Blueprint {
    /// Look every name up in the world's catalog.
    pub fn resolve(&self, world: &World) -> SimResult<Dungeon> {
        Ok(Dungeon::from_names(
            world,
            self.archetype,
            self.name.clone(),
            &self.names,
        )?)
    }

    /// The last encounter name, which is the boss for cities and lairs.
    pub fn boss(&self) -> Option<&str> {
        match self.archetype {
            Archetype::City | Archetype::Lair => self.names.last().map(String::as_str),
            Archetype::OpenDungeon | Archetype::Scripted => None,
        }
    }
}

/// Generate a resolved dungeon.
pub fn generate<R: RandomSource + ?Sized>(world: &World, rng: &mut R) -> SimResult<Dungeon> {
    let blueprint = blueprint(world, rng)?;
    tracing::trace!(name = %blueprint.name, names = ?blueprint.names, "generated blueprint");
    blueprint.resolve(world)
}

/// Draw an archetype and build its blueprint, place name included.
pub fn blueprint<R: RandomSource + ?Sized>(world: &World, rng: &mut R) -> SimResult<Blueprint> {
    let roll = rng.uniform();
    let mut blueprint = if roll < CITY_CHANCE {
        city(rng)?
    } else if roll < CITY_CHANCE + LAIR_CHANCE {
        lair(world, rng)?
    } else {
        open_dungeon(world, rng)?
    };
    let place = pick(rng, PLACES, "places")?;
    blueprint.name = format!("{} of {place}", blueprint.name);
    Ok(blueprint)
}

fn pick<'a, R: RandomSource + ?Sized>(
    rng: &mut R,
    items: &[&'a str],
    pool: &'static str,
) -> SimResult<&'a str> {
    rng.choose(items).copied().ok_or(SimError::EmptyPool(pool))
}

struct CityTheme {
    boss: &'static str,
    pool: Vec<&'static str>,
    name: String,
    trap: &'static str,
}

fn city<R: RandomSource + ?Sized>(rng: &mut R) -> SimResult<Blueprint> {
    let species = *rng
        .choose(&[CitySpecies::Goblin, CitySpecies::Orc, CitySpecies::Undead])
    .ok_or(SimError::EmptyPool("city species"))?;
    let encounter_count = rng.roll_die(4) + rng.roll_die(4);
    city_of(species, encounter_count, rng)
}

/// Build a city blueprint for a fixed species and encounter count.
///
/// `encounter_count` includes the boss; half of it (rounded down) is added
/// as traps.
pub fn city_of<R: RandomSource + ?Sized>(
    species: CitySpecies,
    encounter_count: u32,
    rng: &mut R,
) -> SimResult<Blueprint> {
    let trap_count = encounter_count / 2;
    let theme = match species {
        CitySpecies::Goblin => goblin_city(encounter_count, rng)?,
        CitySpecies::Orc => orc_city(encounter_count, rng)?,
        CitySpecies::Undead => undead_city(rng)?,
    };

    let mut names = Vec::new();
    for _ in 1..encounter_count {
        names.push(pick(rng, &theme.pool, "city pool")?.to_string());
    }
    for _ in 0..trap_count {
        names.push(theme.trap.to_string());
    }
    rng.shuffle(&mut names);
    names.push(theme.boss.to_string());

    Ok(Blueprint {
        archetype: Archetype::City,
        city_species: Some(species),
        name: theme.name,
        names,
        regular_count: encounter_count.max(1) as usize,
        trap_count: trap_count as usize,
    })
}

fn goblin_city<R: RandomSource + ?Sized>(encounter_count: u32, rng: &mut R) -> SimResult<CityTheme> {
    let mut boss = pick(
        rng,
        &["Goblin Chieftain", "Goblin Chieftain", "Goblins"],
        "goblin bosses",
    )?;
    if encounter_count >= 6 {
        boss = "Goblin Chieftain";
    }

    let mut pool = vec!["Goblins"; 4];
    let mut name = format!(
        "Goblin {}",
        pick(
            rng,
            &["Tunnels", "Warrens", "Cave", "Town", "Hole", "Tower", "Fort"],
            "goblin names",
        )?
    );

    let variant = rng.uniform();
    if variant < 0.2 {
        name = format!("Night {name}");
        pool.push("Ghosts");
    } else if variant < 0.4 {
        name = format!("Mountain {name}");
        pool.extend(["Wolves", "Wolves"]);
    }

    let trap = pick(
        rng,
        &["Boulder Trap", "Snake Pit", "Poison Needle Trap"],
        "goblin traps",
    )?;

    Ok(CityTheme {
        boss,
        pool,
        name,
        trap,
    })
}

fn orc_city<R: RandomSource + ?Sized>(encounter_count: u32, rng: &mut R) -> SimResult<CityTheme> {
    let boss = pick(
        rng,
        &[
            "Orc Warlord",
            "Orc Warlord",
            "Orc Warlord",
            "Orc Shaman",
            "Orc Shaman",
            "Orcs",
        ],
        "orc bosses",
    )?;

    let mut pool = vec!["Orcs", "Orcs", "Orcs", "Orcs", "Wolves", "Wolves"];
    let mut places = vec!["Keep", "Cave", "Town", "Camp", "Tower", "Warcamp", "Fort"];
    if encounter_count >= 6 {
        places.extend(["City", "Citadel"]);
    }
    let mut name = format!("Orc {}", pick(rng, &places, "orc names")?);

    if boss == "Orc Warlord" {
        pool.push("Orc Shaman");
    }
    if rng.uniform() < 0.2 {
        name = format!("Black {name}");
        pool.push("Orc Warlord");
    }

    let trap = pick(
        rng,
        &["Boulder Trap", "Snake Pit", "Poison Needle Trap", "Cursed Altar"],
        "orc traps",
    )?;

    Ok(CityTheme {
        boss,
        pool,
        name,
        trap,
    })
}

fn undead_city<R: RandomSource + ?Sized>(rng: &mut R) -> SimResult<CityTheme> {
    let boss = pick(
        rng,
        &["Skeletons", "Zombies", "Ghosts", "Ghosts", "Lich"],
        "undead bosses",
    )?;
    let pool = vec!["Skeletons", "Skeletons", "Zombies", "Zombies", "Ghosts"];
    let name = format!(
        "Undead {}",
        pick(
            rng,
            &["Sepulcher", "Pyramid", "Mausoleum", "Ziggurat", "City", "Keep"],
            "undead names",
        )?
    );
    let trap = pick(
        rng,
        &["Boulder Trap", "Poison Needle Trap", "Cursed Altar"],
        "undead traps",
    )?;

    Ok(CityTheme {
        boss,
        pool,
        name,
        trap,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Thralls {
    Goblins,
    Orcs,
    Undead,
}

impl Thralls {
    fn pool(self) -> &'static [&'static str] {
        match self {
            Self::Goblins => &["Goblins", "Wolves"],
            Self::Orcs => &["Orcs", "Wolves"],
            Self::Undead => &["Zombies", "Skeletons"],
        }
    }
}

fn lair<R: RandomSource + ?Sized>(world: &World, rng: &mut R) -> SimResult<Blueprint> {
    let boss = pick(rng, &["Dragon", "Basilisk", "Lich"], "lair bosses")?;
    let mut thralls = *rng
        .choose(&[Thralls::Goblins, Thralls::Orcs, Thralls::Undead])
        .ok_or(SimError::EmptyPool("lair thralls"))?;
    if boss == "Lich" {
        thralls = Thralls::Undead;
    }

    let thrall_count = rng.roll_die(3);
    let trap_count = rng.roll_die(3);

    let mut prefixes = vec!["Ancient", "Infernal", "Old", "Nightmare", "Dread", "Sunken"];
    let mut suffixes = vec!["Lair", "Den", "Cave", "Maw"];
    if boss == "Lich" {
        suffixes.retain(|s| *s != "Maw");
        suffixes.push("Tomb");
    }
    if boss == "Basilisk" {
        prefixes.retain(|p| *p != "Ancient" && *p != "Infernal");
    }
    let name = format!(
        "{} {}",
        pick(rng, &prefixes, "lair prefixes")?,
        pick(rng, &suffixes, "lair suffixes")?
    );

    let mut names = Vec::new();
    for _ in 0..thrall_count {
        names.push(pick(rng, thralls.pool(), "lair thralls")?.to_string());
    }
    let traps = world.trap_names();
    for _ in 0..trap_count {
        names.push(pick(rng, &traps, "traps")?.to_string());
    }
    rng.shuffle(&mut names);
    names.push(boss.to_string());

    Ok(Blueprint {
        archetype: Archetype::Lair,
        city_species: None,
        name,
        names,
        regular_count: thrall_count as usize + 1,
        trap_count: trap_count as usize,
    })
}

fn open_dungeon<R: RandomSource + ?Sized>(world: &World, rng: &mut R) -> SimResult<Blueprint> {
    const WANDERERS: [(&str, f64); 6] = [
        ("Goblins", 0.2),
        ("Orcs", 0.2),
        ("Wolves", 0.5),
        ("Dragon", 0.1),
        ("Lich", 0.1),
        ("Basilisk", 0.2),
    ];

    let encounter_count = rng.roll_die(4);
    let trap_count = rng.roll_die(3) + rng.roll_die(3);

    let mut pool = vec!["Zombies", "Skeletons", "Ghosts"];
    for (name, chance) in WANDERERS {
        if rng.uniform() < chance {
            pool.push(name);
        }
    }

    let mut names = Vec::new();
    for _ in 0..encounter_count {
        names.push(pick(rng, &pool, "dungeon pool")?.to_string());
    }
    let traps = world.trap_names();
    for _ in 0..trap_count {
        names.push(pick(rng, &traps, "traps")?.to_string());
    }

    let prefix = pick(
        rng,
        &["Lost", "Forgotten", "Abandoned", "Timeless"],
        "dungeon prefixes",
    )?;
    let suffixes: &[&str] = if pool.contains(&"Dragon") {
        &["Treasure"]
    } else {
        &["Temple", "Dungeon", "Treasure"]
    };
    let suffix = pick(rng, suffixes, "dungeon suffixes")?;

    rng.shuffle(&mut names);

    Ok(Blueprint {
        archetype: Archetype::OpenDungeon,
        city_species: None,
        name: format!("{prefix} {suffix}"),
        names,
        regular_count: encounter_count as usize,
        trap_count: trap_count as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_mechanics::ScriptedSource;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn world() -> World {
        World::standard().unwrap()
    }

    #[test]
    fn large_goblin_city_forces_chieftain() {
        // 0.99 picks the last option everywhere, which would be plain Goblins.
        let mut src = ScriptedSource::with_uniforms(vec![0.99]);
        let bp = city_of(CitySpecies::Goblin, 6, &mut src).unwrap();
        assert_eq!(bp.boss(), Some("Goblin Chieftain"));
        assert_eq!(bp.names.len(), 6 + 3);
        assert_eq!(bp.regular_count, 6);
        assert_eq!(bp.trap_count, 3);
    }

    #[test]
    fn small_goblin_city_keeps_weighted_boss() {
        let mut src = ScriptedSource::with_uniforms(vec![0.99]);
        let bp = city_of(CitySpecies::Goblin, 4, &mut src).unwrap();
        assert_eq!(bp.boss(), Some("Goblins"));
        assert_eq!(bp.name, "Goblin Fort");
        let traps = bp.names.iter().filter(|n| *n == "Poison Needle Trap").count();
        assert_eq!(traps, 2);
    }

    #[test]
    fn night_goblins_add_ghosts() {
        // boss, name, variant < 0.2, then all draws at 0.1.
        let mut src = ScriptedSource::with_uniforms(vec![0.1]);
        let bp = city_of(CitySpecies::Goblin, 2, &mut src).unwrap();
        assert!(bp.name.starts_with("Night Goblin"), "{}", bp.name);
    }

    #[test]
    fn orc_warlord_city() {
        let mut src = ScriptedSource::with_uniforms(vec![0.0]);
        let bp = city_of(CitySpecies::Orc, 8, &mut src).unwrap();
        assert_eq!(bp.boss(), Some("Orc Warlord"));
        assert!(bp.name.starts_with("Black Orc"), "{}", bp.name);
        assert_eq!(bp.names.len(), 8 + 4);
    }

    #[test]
    fn lich_lair_forces_undead_thralls() {
        // Boss pick 0.7 -> Lich; thrall pick 0.0 -> Goblins, overridden.
        let w = world();
        let mut src = ScriptedSource::with_uniforms(vec![0.7, 0.0]);
        let bp = lair(&w, &mut src).unwrap();
        assert_eq!(bp.boss(), Some("Lich"));
        assert!(bp.name.ends_with("Lair") || bp.name.ends_with("Den") || bp.name.ends_with("Cave") || bp.name.ends_with("Tomb"));
        assert!(!bp.name.contains("Maw"));

        let traps = w.trap_names();
        for name in &bp.names[..bp.names.len() - 1] {
            assert!(
                name == "Zombies" || name == "Skeletons" || traps.contains(&name.as_str()),
                "unexpected {name}"
            );
        }
        assert_eq!(bp.names.len(), bp.regular_count + bp.trap_count);
    }

    #[test]
    fn dragon_pool_means_treasure() {
        let mut src = ScriptedSource::with_uniforms(vec![0.05]);
        let bp = open_dungeon(&world(), &mut src).unwrap();
        assert_eq!(bp.name, "Lost Treasure");
        assert_eq!(bp.regular_count, 1);
        assert_eq!(bp.trap_count, 2);
        assert_eq!(bp.boss(), None);
    }

    #[test]
    fn place_is_appended() {
        let mut rng = StdRng::seed_from_u64(3);
        let bp = blueprint(&world(), &mut rng).unwrap();
        assert!(PLACES.iter().any(|p| bp.name.ends_with(&format!(" of {p}"))));
    }

    #[test]
    fn archetype_thresholds() {
        let w = world();
        let mut src = ScriptedSource::with_uniforms(vec![0.34]);
        assert_eq!(blueprint(&w, &mut src).unwrap().archetype, Archetype::City);
        let mut src = ScriptedSource::with_uniforms(vec![0.69]);
        assert_eq!(blueprint(&w, &mut src).unwrap().archetype, Archetype::Lair);
        let mut src = ScriptedSource::with_uniforms(vec![0.7]);
        assert_eq!(blueprint(&w, &mut src).unwrap().archetype, Archetype::OpenDungeon);
    }

    #[test]
    fn world_without_traps_cannot_build_lairs() {
        let mut def = dc_core::WorldDef::standard();
        def.encounters.retain(|e| !e.is_trap());
        let w = World::from_def(def).unwrap();
        let mut src = ScriptedSource::with_uniforms(vec![0.5]);
        assert!(matches!(lair(&w, &mut src), Err(SimError::EmptyPool("traps"))));
    }

    proptest! {
        #[test]
        fn generated_dungeons_are_consistent(seed in any::<u64>()) {
            let w = world();
            let mut rng = StdRng::seed_from_u64(seed);
            let bp = blueprint(&w, &mut rng).unwrap();

            prop_assert_eq!(bp.names.len(), bp.regular_count + bp.trap_count);
            prop_assert!(bp.names.len() <= w.max_dungeon_length());
            let traps = bp.names.iter().filter(|n| w.encounter(n).unwrap().is_trap()).count();
            prop_assert_eq!(traps, bp.trap_count);

            if bp.city_species == Some(CitySpecies::Goblin) && bp.regular_count >= 6 {
                prop_assert_eq!(bp.boss(), Some("Goblin Chieftain"));
            }
            if bp.archetype == Archetype::Lair {
                let boss = bp.boss().unwrap();
                prop_assert!(["Dragon", "Basilisk", "Lich"].contains(&boss));
            }

            let dungeon = bp.resolve(&w).unwrap();
            prop_assert_eq!(dungeon.len(), bp.names.len());
            prop_assert_eq!(dungeon.encounter_names(), bp.names.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn generation_is_deterministic(seed in any::<u64>()) {
            let w = world();
            let a = blueprint(&w, &mut StdRng::seed_from_u64(seed)).unwrap();
            let b = blueprint(&w, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
