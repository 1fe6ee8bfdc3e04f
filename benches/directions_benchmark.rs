use criterion::{criterion_group, criterion_main, Criterion};
use geo::LineString;
use serde_json::{json, Value};
use std::hint::black_box;
use voya_gateway::services::directions::routes_from_value;

/// Encode `points` ([lat, lng]) as a Google overview polyline.
fn encode(points: &[[f64; 2]]) -> String {
    let line: LineString<f64> = points.iter().map(|p| (p[1], p[0])).collect();
    polyline::encode_coordinates(line, 5).expect("Failed to encode polyline")
}

/// Directions reply with one transit route of `points` vertices.
fn directions_reply(points: usize) -> Value {
    // Walk north-east from Times Square in small steps
    let path: Vec<[f64; 2]> = (0..points)
        .map(|i| {
            let t = i as f64 * 0.0001;
            [40.7580 + t, -73.9855 + t / 2.0]
        })
        .collect();

    let steps: Vec<Value> = (0..8)
        .map(|i| {
            json!({
                "transit_details": {
                    "line": { "short_name": format!("M{}", i), "vehicle": { "type": "BUS" } },
                    "departure_time": { "text": "10:30 AM" }
                }
            })
        })
        .collect();

    json!({
        "status": "OK",
        "routes": [{
            "legs": [{
                "distance": { "text": "12 km", "value": 12000 },
                "duration": { "text": "48 mins", "value": 2880 },
                "steps": steps
            }],
            "overview_polyline": { "points": encode(&path) },
            "summary": "5th Ave"
        }]
    })
}

fn benchmark_route_shaping(c: &mut Criterion) {
    let short = directions_reply(50);
    let long = directions_reply(5_000);

    let mut group = c.benchmark_group("route_shaping");

    group.bench_function("short_route", |b| {
        b.iter(|| routes_from_value(black_box(short.clone())))
    });

    group.bench_function("long_route", |b| {
        b.iter(|| routes_from_value(black_box(long.clone())))
    });

    group.finish();
}

criterion_group!(benches, benchmark_route_shaping);
criterion_main!(benches);
