use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use taxi_fleet::{DriverDraft, LicenseNumber, ManufacturerDraft, paginate};
use taxi_infra::InMemoryFleetRegistry;

fn seeded_registry(size: usize) -> InMemoryFleetRegistry {
    let registry = InMemoryFleetRegistry::default();
    for i in 0..size {
        registry
            .create_manufacturer(ManufacturerDraft {
                name: format!("Manufacturer {i}"),
                country: "Germany".to_string(),
            })
            .unwrap();
        registry
            .create_driver(DriverDraft {
                username: format!("driver{i}"),
                first_name: "Dummy".to_string(),
                last_name: "Petrenko".to_string(),
                license_number: LicenseNumber::parse(&format!("ABC{:05}", i % 100_000)).unwrap(),
            })
            .unwrap();
    }
    registry
}

fn bench_list_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_filtering");

    for size in [100usize, 1_000, 2_000] {
        let registry = seeded_registry(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("manufacturers_empty_query", size), &size, |b, _| {
            b.iter(|| registry.list_manufacturers(black_box("")));
        });
        group.bench_with_input(BenchmarkId::new("manufacturers_substring", size), &size, |b, _| {
            b.iter(|| registry.list_manufacturers(black_box("turer 9")));
        });
        group.bench_with_input(BenchmarkId::new("drivers_substring", size), &size, |b, _| {
            b.iter(|| registry.list_drivers(black_box("DRIVER1")));
        });
    }

    group.finish();
}

fn bench_pagination(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");
    let registry = seeded_registry(1_000);

    group.bench_function("filter_then_first_page", |b| {
        b.iter(|| paginate(registry.list_drivers(black_box("driver")), 1, 5).unwrap());
    });
    group.bench_function("filter_then_last_page", |b| {
        b.iter(|| paginate(registry.list_drivers(black_box("driver")), 200, 5).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_list_filtering, bench_pagination);
criterion_main!(benches);
