// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use grasp_gestures::machine::Hands;
use grasp_gestures::types::HandId;
use grasp_registry::{TargetFlags, TargetId};

fn build_rig(hand_count: usize, target_count: usize) -> (Hands, Vec<HandId>, Vec<TargetId>) {
    let mut hands = Hands::new();
    let hs: Vec<_> = (0..hand_count).map(|_| hands.register_hand()).collect();
    let ts: Vec<_> = (0..target_count)
        .map(|_| hands.insert_target(TargetFlags::all()))
        .collect();
    (hands, hs, ts)
}

// A collider re-reports every contact each frame; after the first tick, every
// hit is a pure dedup check. This is the hot path of an idle scene.
fn bench_steady_hover(c: &mut Criterion) {
    let mut group = c.benchmark_group("steady_hover");
    for (hand_count, target_count) in [(2usize, 16usize), (4, 64), (8, 256)] {
        let (mut hands, hs, ts) = build_rig(hand_count, target_count);
        for &h in &hs {
            for &t in &ts {
                let _ = hands.on_hit(h, t);
            }
        }
        group.throughput(Throughput::Elements((hand_count * target_count) as u64));
        group.bench_function(format!("tick_{}x{}", hand_count, target_count), |b| {
            b.iter(|| {
                for &h in &hs {
                    for &t in &ts {
                        black_box(hands.on_hit(h, t));
                    }
                }
            });
        });
    }
    group.finish();
}

fn bench_grab_release_cycle(c: &mut Criterion) {
    let (mut hands, hs, ts) = build_rig(1, 1);
    let (h, t) = (hs[0], ts[0]);
    let _ = hands.on_hit(h, t);
    c.bench_function("grab_release_cycle", |b| {
        b.iter(|| {
            black_box(hands.press_grab(h));
            black_box(hands.release_grab(h));
        });
    });
}

fn bench_dragover_switching(c: &mut Criterion) {
    let (mut hands, hs, ts) = build_rig(1, 3);
    let h = hs[0];
    let _ = hands.press_drag(h);
    let _ = hands.on_hit(h, ts[0]);
    c.bench_function("dragover_switch_pair", |b| {
        b.iter(|| {
            black_box(hands.on_hit(h, ts[1]));
            black_box(hands.on_hit(h, ts[2]));
        });
    });
}

criterion_group!(
    benches,
    bench_steady_hover,
    bench_grab_release_cycle,
    bench_dragover_switching
);
criterion_main!(benches);
