use pokehub::{BattlePhase, BattleSession, BattleState, PokeApi};
use rand::Rng;

#[tokio::main]
async fn main() {
    println!("=== PokeHub Battle Demo ===");
    println!("Fetching two random combatants...");

    let mut session = BattleSession::new(PokeApi::new());
    if let Err(e) = session.initialize().await {
        println!("Error starting battle: {}", e);
        return;
    }

    {
        let state = session.state().expect("session was initialized");
        print_matchup(state);
    }

    let mut rounds = 0;
    while session.winner().is_none() {
        let Some(state) = session.state() else { break };

        // Drive the player side with the same rule the opponent uses:
        // a random affordable skill, or a skip when out of mana.
        let bus = match choose_player_skill(state) {
            Some(skill_index) => session.select_skill(skill_index).await,
            None => session.skip_turn().await,
        };

        if let Some(state) = session.state() {
            bus.print_formatted(state);
            print_status(state);
        }

        rounds += 1;
        if rounds > 100 {
            println!("Battle reached the demo round limit - ending early.");
            break;
        }
    }

    if let Some(winner) = session.winner() {
        println!("🏆 {} wins the battle after {} round(s)!", winner, rounds);
    }
}

fn choose_player_skill(state: &BattleState) -> Option<usize> {
    if state.phase != BattlePhase::AwaitingPlayerChoice {
        return None;
    }
    let affordable: Vec<usize> = state.combatants[0]
        .skills
        .iter()
        .enumerate()
        .filter(|(_, skill)| skill.mana_cost <= state.mana[0])
        .map(|(index, _)| index)
        .collect();
    if affordable.is_empty() {
        return None;
    }
    let mut rng = rand::rng();
    Some(affordable[rng.random_range(0..affordable.len())])
}

fn print_matchup(state: &BattleState) {
    let [player, opponent] = &state.combatants;
    println!();
    println!("🔥 {} (#{}) challenges {} (#{})!", player.name, player.id, opponent.name, opponent.id);
    for (combatant, hp) in state.combatants.iter().zip(state.hp.iter()) {
        let types = combatant.types.join("/");
        println!("  {} [{}] - HP: {}", combatant.name, types, hp);
        for skill in &combatant.skills {
            println!("    {} (power {}, mana {})", skill.name, skill.power, skill.mana_cost);
        }
    }
    println!();
}

fn print_status(state: &BattleState) {
    for (index, combatant) in state.combatants.iter().enumerate() {
        println!(
            "  {}: HP {}/{} | Mana {}/{}",
            combatant.name,
            state.hp[index],
            state.max_hp[index],
            state.mana[index],
            pokehub::config::INITIAL_MANA,
        );
    }
    println!();
}
