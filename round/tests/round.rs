use std::sync::Arc;
use std::time::Duration;

use round::judge::{HIGH_TIER, LOW_TIER};
use round::{ClockTick, Controller, Phase, QuestionBank, RoundEvent};
use tokio::sync::mpsc;
use tokio::time::{timeout, Instant};

const BANK: &str = r#"[
    {"id": 1, "prompt": "What is the largest planet in our solar system?",
     "options": ["Earth", "Jupiter", "Saturn", "Neptune"], "correct_option": 1, "time_limit": 4},
    {"id": 2, "prompt": "Which programming language is known as the 'language of the web'?",
     "options": ["Python", "Java", "JavaScript", "C++"], "correct_option": 2, "time_limit": 3},
    {"id": 3, "prompt": "In which year did the Berlin Wall fall?",
     "options": ["1987", "1989", "1991", "1993"], "correct_option": 1, "time_limit": 6}
]"#;

fn room() -> (Controller, mpsc::Receiver<ClockTick>, mpsc::UnboundedReceiver<RoundEvent>) {
    let bank = Arc::new(QuestionBank::from_json(BANK).unwrap());
    let (tx, events) = mpsc::unbounded_channel();
    let (ctl, ticks) = Controller::new(bank, tx);
    (ctl, ticks, events)
}

async fn next_tick(ticks: &mut mpsc::Receiver<ClockTick>) -> Option<ClockTick> {
    timeout(Duration::from_secs(30), ticks.recv()).await.ok().flatten()
}

fn drain(events: &mut mpsc::UnboundedReceiver<RoundEvent>) -> Vec<RoundEvent> {
    let mut out = vec![];
    while let Ok(ev) = events.try_recv() {
        out.push(ev);
    }
    out
}

#[tokio::test(start_paused = true)]
async fn idle_round_runs_out_on_the_clock() {
    let (mut ctl, mut ticks, mut events) = room();
    let started = Instant::now();
    ctl.begin(2).unwrap();

    while ctl.phase() == Phase::Playing {
        let tick = next_tick(&mut ticks).await.expect("clock stalled mid-round");
        ctl.on_tick(tick).unwrap();
    }

    assert_eq!(ctl.phase(), Phase::Finished);
    assert_eq!(ctl.state().total_score, 0);
    assert!(started.elapsed() >= Duration::from_secs(4 + 3 + 6));

    let events = drain(&mut events);
    let questions: Vec<_> = events
        .iter()
        .filter_map(|ev| match ev {
            RoundEvent::Question(idx) => Some(*idx),
            _ => None,
        })
        .collect();
    assert_eq!(questions, vec![0, 1, 2]);
    let ticks_seen = events.iter().filter(|ev| matches!(ev, RoundEvent::Tick(_))).count();
    assert_eq!(ticks_seen, 4 + 3 + 6);
    assert_eq!(events.last(), Some(&RoundEvent::Finished(0)));

    assert_eq!(next_tick(&mut ticks).await, None);
}

#[tokio::test(start_paused = true)]
async fn mixed_round_adds_up() {
    let (mut ctl, mut ticks, mut events) = room();
    ctl.begin(4).unwrap();

    // right away: high tier
    ctl.select_option(1).unwrap();
    ctl.submit().unwrap();

    // wrong pick left to expire
    ctl.select_option(0).unwrap();
    while ctl.state().current_question == 1 {
        let tick = next_tick(&mut ticks).await.unwrap();
        ctl.on_tick(tick).unwrap();
    }

    // five of six seconds gone: low tier
    for _ in 0..5 {
        let tick = next_tick(&mut ticks).await.unwrap();
        ctl.on_tick(tick).unwrap();
    }
    assert_eq!(ctl.state().seconds_remaining, 1);
    ctl.select_option(1).unwrap();
    ctl.submit().unwrap();

    assert_eq!(ctl.phase(), Phase::Finished);
    assert_eq!(ctl.state().total_score, HIGH_TIER + LOW_TIER);
    let events = drain(&mut events);
    assert_eq!(events.last(), Some(&RoundEvent::Finished(HIGH_TIER + LOW_TIER)));
}

#[tokio::test(start_paused = true)]
async fn leaving_drops_whatever_the_clock_had_queued() {
    let (mut ctl, mut ticks, mut events) = room();
    ctl.begin(2).unwrap();
    let tick = next_tick(&mut ticks).await.unwrap();
    ctl.on_tick(tick).unwrap();
    drain(&mut events);

    ctl.leave();
    let state = ctl.state().clone();
    assert_eq!(state.phase, Phase::Left);
    assert_eq!(state.seconds_remaining, 3);

    while let Some(late) = next_tick(&mut ticks).await {
        ctl.on_tick(late).unwrap();
    }
    assert_eq!(ctl.state(), &state);
    assert_eq!(drain(&mut events), vec![RoundEvent::PhaseChanged(Phase::Left)]);
}
