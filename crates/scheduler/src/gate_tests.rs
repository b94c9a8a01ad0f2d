// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn starts_unpaused() {
    let gate = Gate::new();
    assert!(!gate.is_paused());
    gate.wait_if_paused(); // must not block
}

#[test]
fn pause_then_resume_is_idempotent() {
    let gate = Gate::new();
    gate.pause();
    gate.pause();
    assert!(gate.is_paused());
    gate.resume();
    gate.resume();
    assert!(!gate.is_paused());
}

#[test]
fn waiter_wakes_up_on_resume() {
    let gate = Arc::new(Gate::new());
    gate.pause();

    let waiter = {
        let gate = gate.clone();
        std::thread::spawn(move || {
            gate.wait_if_paused();
        })
    };

    std::thread::sleep(Duration::from_millis(20));
    gate.resume();
    waiter.join().expect("waiter thread should not panic");
}
