use crate::battle::state::{BattleState, TurnRng};
use crate::combatant::{Combatant, Skill, Stat};
use crate::config;

/// A builder for creating test combatants with common defaults.
///
/// # Example
/// ```rust,ignore
/// let combatant = TestCombatantBuilder::new(1, "pikachu")
///     .with_attack(80)
///     .with_skills(vec![skill("thunder-shock", 25)])
///     .build();
/// ```
pub struct TestCombatantBuilder {
    id: u16,
    name: String,
    hp: u16,
    attack: u16,
    defense: u16,
    with_stats: bool,
    types: Vec<String>,
    weaknesses: Vec<String>,
    skills: Vec<Skill>,
}

impl TestCombatantBuilder {
    pub fn new(id: u16, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            hp: 300,
            attack: 150,
            defense: 150,
            with_stats: true,
            types: vec!["normal".to_string()],
            weaknesses: Vec::new(),
            skills: vec![skill("tackle", 25)],
        }
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_attack(mut self, attack: u16) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_defense(mut self, defense: u16) -> Self {
        self.defense = defense;
        self
    }

    /// Build a combatant with an empty stat list, to exercise fallbacks.
    pub fn without_stats(mut self) -> Self {
        self.with_stats = false;
        self
    }

    pub fn with_weaknesses(mut self, weaknesses: Vec<&str>) -> Self {
        self.weaknesses = weaknesses.into_iter().map(String::from).collect();
        self
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    pub fn build(self) -> Combatant {
        let stats = if self.with_stats {
            vec![
                Stat {
                    name: "hp".to_string(),
                    value: self.hp,
                },
                Stat {
                    name: "attack".to_string(),
                    value: self.attack,
                },
                Stat {
                    name: "defense".to_string(),
                    value: self.defense,
                },
            ]
        } else {
            Vec::new()
        };

        Combatant {
            id: self.id,
            name: self.name,
            stats,
            types: self.types,
            weaknesses: self.weaknesses,
            skills: self.skills,
            sprite: None,
        }
    }
}

/// A normal-type skill with the fixed power and the given mana cost.
pub fn skill(name: &str, mana_cost: u16) -> Skill {
    Skill {
        name: name.to_string(),
        power: config::SKILL_POWER,
        accuracy: 100,
        skill_type: "normal".to_string(),
        mana_cost,
    }
}

/// Creates a standard battle state from two combatants.
pub fn create_test_battle(player: Combatant, opponent: Combatant) -> BattleState {
    BattleState::new(player, opponent)
}

/// A `TurnRng` whose rolls of 50 clear both the dodge (25%) and crit (5%)
/// checks: every attack hits plainly. Useful when the specific outcome is
/// not what the test is about.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}
