//! Media Player State Machine
//!
//! This example walks a two-level hierarchy through a full session.
//!
//! Key concepts:
//! - Composite states with default children (Active starts Paused)
//! - Escalation: Playing1 has no STOP row, its parent Playing does
//! - Only the composites whose ancestry changes are exited and entered
//!
//! Run with: cargo run --example media_player

use hfsm::builder::TreeBuilder;
use hfsm::core::State;
use hfsm::machine::Machine;
use hfsm::transitions;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Event {
    SwOff,
    SwOn,
    Start,
    Stop,
    Next,
}

#[derive(Default)]
struct Player {
    tracks_played: u32,
}

struct Printing {
    name: &'static str,
    depth: usize,
}

impl Printing {
    fn say(&self, hook: &str) {
        println!("{:indent$}{}::{}", "", self.name, hook, indent = self.depth * 2);
    }
}

impl State<Player, Event> for Printing {
    fn name(&self) -> &str {
        self.name
    }

    fn on_entry(&self, _player: &mut Player, _event: &Event) {
        self.say("on_entry");
    }

    fn perform(&self, player: &mut Player, _event: &Event) {
        if self.name.starts_with("Playing") {
            player.tracks_played += 1;
        }
        self.say("perform");
    }

    fn on_exit(&self, _player: &mut Player, _event: &Event) {
        self.say("on_exit");
    }
}

fn state(name: &'static str, depth: usize) -> Printing {
    Printing { name, depth }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Media Player State Machine ===\n");

    let mut builder = TreeBuilder::<Player, Event>::new();
    let sleeping = builder.leaf(state("Sleeping", 1));
    let active = builder.composite(state("Active", 1));
    let paused = builder.leaf(state("Paused", 2));
    let playing = builder.composite(state("Playing", 2));
    let playing1 = builder.leaf(state("Playing1", 3));
    let playing2 = builder.leaf(state("Playing2", 3));

    builder.root(transitions! {
        sleeping, Event::SwOn => active;
        active, Event::SwOff => sleeping;
    });
    builder.set(
        active,
        transitions! {
            paused, Event::Start => playing;
            playing, Event::Stop => paused;
        },
    );
    builder.set(
        playing,
        transitions! {
            playing1, Event::Next => playing2;
            playing2, Event::Next => playing1;
        },
    );

    let tree = match builder.build() {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("invalid state tree: {err}");
            return;
        }
    };

    let mut machine = match Machine::builder(tree)
        .initial(sleeping)
        .context(Player::default())
        .build()
    {
        Ok(machine) => machine,
        Err(err) => {
            eprintln!("cannot build machine: {err}");
            return;
        }
    };

    for event in [
        Event::SwOn,
        Event::Start,
        Event::Next,
        Event::Next,
        Event::Stop,
        Event::SwOff,
        Event::Stop,
    ] {
        println!("{event:?}");
        if !machine.dispatch(&event) {
            println!("  (not handled)");
        }
    }

    println!("\nTracks played: {}", machine.context().tracks_played);
    let path: Vec<&str> = machine
        .history()
        .get_path()
        .into_iter()
        .filter_map(|id| machine.tree().name(id))
        .collect();
    println!("Path: {}", path.join(" -> "));

    println!("\n=== Example Complete ===");
}
