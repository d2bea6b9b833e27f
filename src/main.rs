//! Neon Void entry point
//!
//! Native builds run a headless autopilot session and log what happens.
//! Rendering, audio and windowing belong to the host engine.
//!
//! Usage: `neon-void [seed] [tuning.json]`

use neon_void::sim::{Controls, EnemyKind, GameEvent, GamePhase, GameState};
use neon_void::{Session, Tuning};

/// Simulated seconds the demo runs for
const DEMO_SECONDS: u32 = 120;
/// Host frame rate the demo pretends to render at
const DEMO_FPS: u32 = 60;

fn main() {
    env_logger::init();
    log::info!("Neon Void (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);

    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::error!("{}; using default tuning", e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let mut session = Session::with_tuning(seed, tuning);
    let mut stats = RunStats::default();
    let frame_dt = 1.0 / DEMO_FPS as f32;

    for frame in 0..DEMO_SECONDS * DEMO_FPS {
        let controls = autopilot(session.state(), frame);
        session.frame(&controls, frame_dt);
        for event in session.drain_events() {
            stats.record(&event);
        }
    }

    let hud = session.state().hud();
    log::info!(
        "Finished: score {}, wave {}, hp {}% | kills {} (grunts {}, chasers {}), hits taken {}, escapes {}, deaths {}",
        hud.score,
        hud.wave,
        hud.hp,
        stats.grunt_kills + stats.chaser_kills,
        stats.grunt_kills,
        stats.chaser_kills,
        stats.hits_taken,
        stats.escapes,
        stats.deaths,
    );
}

#[derive(Default)]
struct RunStats {
    grunt_kills: u32,
    chaser_kills: u32,
    hits_taken: u32,
    escapes: u32,
    deaths: u32,
}

impl RunStats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::EnemyKilled { kind, .. } => match kind {
                EnemyKind::Grunt => self.grunt_kills += 1,
                EnemyKind::Chaser => self.chaser_kills += 1,
            },
            GameEvent::PlayerHit { hp } => {
                self.hits_taken += 1;
                log::debug!("Hit! hp {}", hp);
            }
            GameEvent::EnemyEscaped { .. } => self.escapes += 1,
            GameEvent::GameOver { score, level } => {
                self.deaths += 1;
                log::info!("SYSTEM FAILURE at score {} (wave {})", score, level);
            }
            GameEvent::Restarted => log::info!("Rebooting..."),
            _ => {}
        }
    }
}

/// Simple scripted pilot: line up under the lowest enemy, keep firing,
/// dash sideways away from anything about to ram us.
fn autopilot(state: &GameState, frame: u32) -> Controls {
    if state.phase == GamePhase::GameOver {
        // Tap fire to reboot
        return Controls {
            fire: frame % 2 == 0,
            ..Default::default()
        };
    }

    let player = state.player.pos;
    let target = state
        .enemies
        .iter()
        .filter(|e| e.active && e.pos.y < player.y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let mut controls = Controls {
        fire: true,
        ..Default::default()
    };

    if let Some(enemy) = target {
        let dx = enemy.pos.x - player.x;
        controls.left = dx < -6.0;
        controls.right = dx > 6.0;

        let threat = (enemy.pos - player).length() < 90.0;
        if threat {
            // Sidestep rather than close in
            std::mem::swap(&mut controls.left, &mut controls.right);
            controls.dash = frame % 30 == 0;
        }
    }

    // Hold station near the bottom of the screen
    controls.down = player.y < 480.0;
    controls.up = player.y > 540.0;

    controls
}
