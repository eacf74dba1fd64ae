use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use coordinate_converter::geodesy::Transformer;
use coordinate_converter::models::{Axis, CoordinateFormat, GeographicPoint};
use coordinate_converter::processors::{BatchProcessor, CoordinateConverter};
use coordinate_converter::utils::coordinates::{decimal_to_dms, parse_coordinate};

// Points spread over Kenya, inside or near zone 37S
fn create_test_points(count: usize) -> Vec<GeographicPoint> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count.max(1) as f64;
            GeographicPoint::new(-4.5 + 4.0 * t, 34.5 + 7.0 * t)
        })
        .collect()
}

fn create_test_csv(rows: usize) -> Vec<u8> {
    let mut csv = String::from("latitude,longitude,lat_format,lon_format\n");
    for (i, point) in create_test_points(rows).iter().enumerate() {
        if i % 2 == 0 {
            csv.push_str(&format!("{:.6},{:.6},dd,dd\n", point.latitude, point.longitude));
        } else {
            let lat = decimal_to_dms(point.latitude, Axis::Lat).unwrap();
            let lon = decimal_to_dms(point.longitude, Axis::Lon).unwrap();
            csv.push_str(&format!(
                "\"{}\",\"{}\",dms,dms\n",
                lat.replace('"', "\"\""),
                lon.replace('"', "\"\"")
            ));
        }
    }
    csv.into_bytes()
}

fn benchmark_parsing(c: &mut Criterion) {
    let inputs = [
        ("-1.2833", CoordinateFormat::Dd),
        ("1°17.0'S", CoordinateFormat::Dm),
        ("1°17'00\"S", CoordinateFormat::Dms),
        ("S 1 17 0.5", CoordinateFormat::Dms),
        ("1d17'00.123\"S", CoordinateFormat::Dms),
    ];

    c.bench_function("parse_coordinate", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for (input, format) in &inputs {
                if let Ok(value) = parse_coordinate(black_box(input), *format, Axis::Lat) {
                    sum += value;
                }
            }
            black_box(sum)
        })
    });

    c.bench_function("decimal_to_dms", |b| {
        b.iter(|| black_box(decimal_to_dms(black_box(-1.283_333_3), Axis::Lat)))
    });
}

fn benchmark_transformation(c: &mut Criterion) {
    let points = create_test_points(100);

    for epsg in [21037, 32737] {
        let transformer = Transformer::from_epsg(epsg).unwrap();
        c.bench_function(&format!("forward_{}", epsg), |b| {
            b.iter(|| {
                let mut ok = 0;
                for point in &points {
                    if transformer.forward(black_box(*point)).is_ok() {
                        ok += 1;
                    }
                }
                black_box(ok)
            })
        });
    }

    let transformer = Transformer::from_epsg(21037).unwrap();
    let projected: Vec<_> = points
        .iter()
        .filter_map(|p| transformer.forward(*p).ok())
        .collect();
    c.bench_function("inverse_21037", |b| {
        b.iter(|| {
            let mut ok = 0;
            for point in &projected {
                if transformer.inverse(black_box(*point)).is_ok() {
                    ok += 1;
                }
            }
            black_box(ok)
        })
    });
}

fn benchmark_batch_sizes(c: &mut Criterion) {
    let converter = CoordinateConverter::new(21037).unwrap();
    let mut group = c.benchmark_group("batch_by_size");

    for &size in &[10, 100, 1000] {
        let csv = create_test_csv(size);
        group.bench_with_input(BenchmarkId::new("rows", size), &csv, |b, csv| {
            b.iter(|| {
                let output = BatchProcessor::new(&converter)
                    .process_bytes(black_box(csv), "bench.csv", None)
                    .unwrap();
                black_box(output.summary.success_count)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parsing,
    benchmark_transformation,
    benchmark_batch_sizes
);
criterion_main!(benches);
