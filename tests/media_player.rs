//! Two-level media player hierarchy.
//!
//! Root: Sleeping, Active{ Paused, Playing{ Playing1, Playing2 } }

use hfsm::builder::TreeBuilder;
use hfsm::config::TableConfig;
use hfsm::core::{State, StateId};
use hfsm::machine::Machine;
use hfsm::transitions;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
enum Event {
    SwOff,
    SwOn,
    Start,
    Stop,
    Next,
}

#[derive(Default, Debug)]
struct Trace {
    calls: Vec<String>,
}

impl Trace {
    fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.calls)
    }
}

macro_rules! recording_state {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Default)]
            struct $name;

            impl State<Trace, Event> for $name {
                fn on_entry(&self, trace: &mut Trace, _event: &Event) {
                    trace.calls.push(format!("{}::on_entry", stringify!($name)));
                }

                fn perform(&self, trace: &mut Trace, _event: &Event) {
                    trace.calls.push(format!("{}::perform", stringify!($name)));
                }

                fn on_exit(&self, trace: &mut Trace, _event: &Event) {
                    trace.calls.push(format!("{}::on_exit", stringify!($name)));
                }
            }
        )*
    };
}

recording_state!(Sleeping, Active, Paused, Playing, Playing1, Playing2);

struct Player {
    machine: Machine<Trace, Event>,
    sleeping: StateId,
    active: StateId,
    paused: StateId,
    playing: StateId,
    playing1: StateId,
    playing2: StateId,
}

fn player() -> Player {
    let mut builder = TreeBuilder::<Trace, Event>::new();
    let sleeping = builder.leaf_of::<Sleeping>();
    let active = builder.composite_of::<Active>();
    let paused = builder.leaf_of::<Paused>();
    let playing = builder.composite_of::<Playing>();
    let playing1 = builder.leaf_of::<Playing1>();
    let playing2 = builder.leaf_of::<Playing2>();

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

    let machine = Machine::builder(builder.build().unwrap())
        .initial(sleeping)
        .context(Trace::default())
        .build()
        .unwrap();

    Player {
        machine,
        sleeping,
        active,
        paused,
        playing,
        playing1,
        playing2,
    }
}

#[test]
fn sw_on_enters_active_default_child() {
    let mut p = player();
    assert!(p.machine.dispatch(&Event::SwOn));

    assert_eq!(p.machine.current(), p.paused);
    assert_eq!(p.machine.previous(), Some(p.sleeping));
    assert_eq!(
        p.machine.context_mut().take(),
        vec![
            "Sleeping::on_exit",
            "Active::on_entry",
            "Paused::on_entry",
            "Paused::perform"
        ]
    );

    let record = p.machine.history().last().unwrap();
    assert!(record.exited.is_empty());
    assert_eq!(record.entered, vec![p.active]);
}

#[test]
fn start_descends_into_playing() {
    let mut p = player();
    p.machine.dispatch(&Event::SwOn);
    p.machine.context_mut().take();

    assert!(p.machine.dispatch(&Event::Start));
    assert_eq!(p.machine.current(), p.playing1);
    assert_eq!(
        p.machine.context_mut().take(),
        vec![
            "Paused::on_exit",
            "Playing::on_entry",
            "Playing1::on_entry",
            "Playing1::perform"
        ]
    );

    let record = p.machine.history().last().unwrap();
    assert!(record.exited.is_empty());
    assert_eq!(record.entered, vec![p.playing]);
}

#[test]
fn next_cycles_between_playing_leaves() {
    let mut p = player();
    p.machine.dispatch(&Event::SwOn);
    p.machine.dispatch(&Event::Start);
    p.machine.context_mut().take();

    assert!(p.machine.dispatch(&Event::Next));
    assert_eq!(p.machine.current(), p.playing2);
    assert_eq!(
        p.machine.context_mut().take(),
        vec!["Playing1::on_exit", "Playing2::on_entry", "Playing2::perform"]
    );
    let record = p.machine.history().last().unwrap();
    assert!(record.exited.is_empty() && record.entered.is_empty());

    assert!(p.machine.dispatch(&Event::Next));
    assert_eq!(p.machine.current(), p.playing1);
    assert_eq!(
        p.machine.context_mut().take(),
        vec!["Playing2::on_exit", "Playing1::on_entry", "Playing1::perform"]
    );
    let record = p.machine.history().last().unwrap();
    assert!(record.exited.is_empty() && record.entered.is_empty());
}

#[test]
fn stop_escalates_from_either_playing_leaf() {
    for extra_next in [false, true] {
        let mut p = player();
        p.machine.dispatch(&Event::SwOn);
        p.machine.dispatch(&Event::Start);
        if extra_next {
            p.machine.dispatch(&Event::Next);
        }
        let leaf = if extra_next { "Playing2" } else { "Playing1" };
        p.machine.context_mut().take();

        assert!(p.machine.dispatch(&Event::Stop));
        assert_eq!(p.machine.current(), p.paused);
        assert_eq!(
            p.machine.context_mut().take(),
            vec![
                format!("{leaf}::on_exit"),
                "Playing::on_exit".to_string(),
                "Paused::on_entry".to_string(),
                "Paused::perform".to_string(),
            ]
        );

        let record = p.machine.history().last().unwrap();
        assert_eq!(record.exited, vec![p.playing]);
        assert!(record.entered.is_empty());
    }
}

#[test]
fn sw_off_escalates_to_root_table() {
    let mut p = player();
    for event in [Event::SwOn, Event::Start, Event::Stop] {
        p.machine.dispatch(&event);
    }
    p.machine.context_mut().take();

    assert!(p.machine.dispatch(&Event::SwOff));
    assert_eq!(p.machine.current(), p.sleeping);
    assert_eq!(
        p.machine.context_mut().take(),
        vec![
            "Paused::on_exit",
            "Active::on_exit",
            "Sleeping::on_entry",
            "Sleeping::perform"
        ]
    );

    let record = p.machine.history().last().unwrap();
    assert_eq!(record.exited, vec![p.active]);
    assert!(record.entered.is_empty());
}

#[test]
fn sw_off_from_deepest_leaf_exits_every_composite() {
    let mut p = player();
    p.machine.dispatch(&Event::SwOn);
    p.machine.dispatch(&Event::Start);
    p.machine.context_mut().take();

    assert!(p.machine.dispatch(&Event::SwOff));
    assert_eq!(
        p.machine.context_mut().take(),
        vec![
            "Playing1::on_exit",
            "Playing::on_exit",
            "Active::on_exit",
            "Sleeping::on_entry",
            "Sleeping::perform"
        ]
    );
    let record = p.machine.history().last().unwrap();
    assert_eq!(record.exited, vec![p.playing, p.active]);
}

#[test]
fn rejected_events_change_nothing() {
    let mut p = player();
    for event in [Event::SwOff, Event::Start, Event::Stop, Event::Next] {
        assert!(!p.machine.dispatch(&event));
    }
    assert_eq!(p.machine.current(), p.sleeping);
    assert_eq!(p.machine.previous(), None);
    assert!(p.machine.context().calls.is_empty());

    p.machine.dispatch(&Event::SwOn);
    p.machine.context_mut().take();
    assert!(!p.machine.dispatch(&Event::SwOn));
    assert!(!p.machine.dispatch(&Event::Next));
    assert_eq!(p.machine.current(), p.paused);
    assert_eq!(p.machine.previous(), Some(p.sleeping));
    assert!(p.machine.context().calls.is_empty());
}

#[test]
fn full_session_history() {
    let mut p = player();
    let script = [
        Event::SwOn,
        Event::Start,
        Event::Next,
        Event::Next,
        Event::Stop,
        Event::SwOff,
    ];
    for event in script {
        assert!(p.machine.dispatch(&event));
    }

    assert_eq!(
        p.machine.history().get_path(),
        vec![
            p.sleeping, p.paused, p.playing1, p.playing2, p.playing1, p.paused, p.sleeping
        ]
    );
    let events: Vec<Event> = p.machine.history().transitions().map(|r| r.event).collect();
    assert_eq!(events, script);
}

#[test]
fn start_enters_initial_state() {
    let mut p = player();
    assert!(p.machine.start(&Event::SwOn));
    assert_eq!(
        p.machine.context_mut().take(),
        vec!["Sleeping::on_entry", "Sleeping::perform"]
    );
    assert_eq!(p.machine.current(), p.sleeping);
}

#[test]
fn machine_starting_inside_a_composite() {
    let p = player();
    let mut machine = Machine::builder(p.machine.tree().clone())
        .initial(p.playing)
        .context(Trace::default())
        .build()
        .unwrap();
    assert_eq!(machine.current(), p.playing1);

    machine.start(&Event::Start);
    assert_eq!(
        machine.context_mut().take(),
        vec![
            "Active::on_entry",
            "Playing::on_entry",
            "Playing1::on_entry",
            "Playing1::perform"
        ]
    );
}

#[test]
fn tables_loaded_from_json_behave_identically() {
    let mut builder = TreeBuilder::<Trace, Event>::new();
    builder.leaf_of::<Sleeping>();
    builder.composite_of::<Active>();
    builder.leaf_of::<Paused>();
    builder.composite_of::<Playing>();
    builder.leaf_of::<Playing1>();
    builder.leaf_of::<Playing2>();

    let config = TableConfig::<Event>::from_json(
        r#"{
            "initial": "Sleeping",
            "root": [
                { "from": "Sleeping", "event": "SwOn", "to": "Active" },
                { "from": "Active", "event": "SwOff", "to": "Sleeping" }
            ],
            "tables": [
                { "state": "Active", "transitions": [
                    { "from": "Paused", "event": "Start", "to": "Playing" },
                    { "from": "Playing", "event": "Stop", "to": "Paused" }
                ] },
                { "state": "Playing", "transitions": [
                    { "from": "Playing1", "event": "Next", "to": "Playing2" },
                    { "from": "Playing2", "event": "Next", "to": "Playing1" }
                ] }
            ]
        }"#,
    )
    .unwrap();
    let initial = config.apply(&mut builder).unwrap().unwrap();

    let mut machine = Machine::builder(builder.build().unwrap())
        .initial(initial)
        .context(Trace::default())
        .build()
        .unwrap();
    let mut reference = player().machine;

    for event in [Event::SwOn, Event::Start, Event::Next, Event::Stop, Event::SwOff] {
        assert_eq!(machine.dispatch(&event), reference.dispatch(&event));
        assert_eq!(machine.context_mut().take(), reference.context_mut().take());
    }
}
