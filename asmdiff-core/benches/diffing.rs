//! Benchmark for type diff performance.

use asmdiff_core::differ::diff_types;
use asmdiff_core::types::{FieldDef, MethodDef, ModuleDef, PropertyDef, TypeDef};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn make_module(types: usize, members: usize, suffix: &str) -> ModuleDef {
    let types = (0..types)
        .map(|t| {
            TypeDef::new(format!("Ns.Type{}", t))
                .with_methods(
                    (0..members)
                        .map(|m| {
                            MethodDef::new(
                                format!("Method{}{}", m, suffix),
                                vec!["System.Int32".to_string()],
                                "System.Void",
                            )
                        })
                        .collect(),
                )
                .with_fields(
                    (0..members)
                        .map(|m| FieldDef::new(format!("field{}", m), "System.String"))
                        .collect(),
                )
                .with_properties(
                    (0..members)
                        .map(|m| PropertyDef::new(format!("Prop{}", m), "System.Object"))
                        .collect(),
                )
        })
        .collect();
    ModuleDef::new("Bench", types)
}

fn bench_identical_modules(c: &mut Criterion) {
    let module = make_module(500, 20, "");
    c.bench_function("diff_identical_500_types", |b| {
        b.iter(|| black_box(diff_types(&module, &module)))
    });
}

fn bench_changed_modules(c: &mut Criterion) {
    let original = make_module(500, 20, "");
    let changed = make_module(500, 20, "V2");
    c.bench_function("diff_renamed_methods_500_types", |b| {
        b.iter(|| black_box(diff_types(&original, &changed)))
    });
}

criterion_group!(benches, bench_identical_modules, bench_changed_modules);
criterion_main!(benches);
