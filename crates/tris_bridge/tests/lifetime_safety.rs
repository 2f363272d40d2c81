//! Engine destruction racing the render loop and other accessors.

mod common;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use common::{Call, ProbeEngine};
use tris_bridge::{
    task_queue, EngineHandle, GeometrySlot, NativeEngine, RenderLoopCoordinator, RenderTask,
    RenderThread,
};
use tris_shared::InputEvent;

#[test]
fn test_destroy_during_render_loop_is_final() {
    let (engine, probe) = ProbeEngine::create();
    let handle = EngineHandle::create(|| Ok(engine)).unwrap();
    let (tasks, receiver) = task_queue();
    let coordinator = RenderLoopCoordinator::new(handle.clone(), Arc::new(GeometrySlot::new()), receiver);
    let render = RenderThread::spawn(coordinator, Duration::from_millis(1)).unwrap();

    let ui = thread::spawn(move || {
        for i in 0..2_000u16 {
            tasks.send(RenderTask::Input(InputEvent::Tap {
                x: f32::from(i),
                y: 0.0,
            }));
            if i % 100 == 0 {
                thread::sleep(Duration::from_millis(1));
            }
        }
    });

    thread::sleep(Duration::from_millis(5));
    assert!(handle.destroy());
    ui.join().unwrap();
    let stats = render.stop().unwrap();

    let calls = probe.calls();
    assert_eq!(calls.last(), Some(&Call::Dropped));
    assert_eq!(probe.count(|c| *c == Call::Dropped), 1);
    assert!(stats.ticks >= 1);

    assert!(handle.with_handle(|engine| engine.restart_game()).is_none());
    assert_eq!(probe.calls().len(), calls.len());
}

#[test]
fn test_concurrent_accessors_stop_at_destruction() {
    let (engine, probe) = ProbeEngine::create();
    let handle = EngineHandle::create(|| Ok(engine)).unwrap();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handle = handle.clone();
            thread::spawn(move || {
                let mut frames = 0u64;
                while handle.with_handle(|engine| engine.on_frame()).is_some() {
                    frames += 1;
                }
                frames
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(5));
    handle.destroy();

    let frames: u64 = workers.into_iter().map(|w| w.join().unwrap()).sum();
    let calls = probe.calls();

    assert_eq!(calls.last(), Some(&Call::Dropped));
    assert_eq!(probe.count(|c| *c == Call::Frame) as u64, frames);
    assert!(handle.rejected_calls() >= 4);
    assert!(!handle.is_alive());
}

#[test]
fn test_tasks_posted_after_destroy_are_discarded() {
    let (engine, probe) = ProbeEngine::create();
    let handle = EngineHandle::create(|| Ok(engine)).unwrap();
    let (tasks, receiver) = task_queue();
    let mut coordinator = RenderLoopCoordinator::new(handle.clone(), Arc::new(GeometrySlot::new()), receiver);

    coordinator.tick();
    handle.destroy();
    tasks.send(RenderTask::RestartGame);
    tasks.send(RenderTask::Input(InputEvent::PointerUp { x: 1.0, y: 1.0 }));
    coordinator.tick();

    assert_eq!(probe.calls(), vec![Call::Frame, Call::Dropped]);
    assert_eq!(coordinator.stats().tasks_discarded, 2);
}
