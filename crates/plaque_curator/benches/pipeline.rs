//! Benchmarks for the documentation pipeline.
//!
//! Run with: cargo bench -p plaque_curator

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use plaque_curator::docs::{DocBundle, IndexOptions};
use plaque_curator::styles::strip_escape_wrappers;
use plaque_curator::{generate_docs, parse_dump, GenerateOptions};

// =============================================================================
// Test Data
// =============================================================================

/// A library of `count` components; every component renders the previous one.
fn generate_library(count: usize) -> String {
    let mut components = Vec::with_capacity(count);

    for i in 0..count {
        let children = if i == 0 {
            String::from(r#"{ "bind": "p-label" }"#)
        } else {
            format!(
                r#"{{ "bind": "p-label" }}, {{ "component": {{ "id": "c{}" }} }}"#,
                i - 1
            )
        };

        components.push(format!(
            r##"{{
  "id": "c{i}",
  "name": "Component {i}",
  "group": "Group {group}",
  "properties": [
    {{ "id": "p-label", "label": "Label", "type": "text", "default": "Item {i}" }},
    {{ "id": "p-size", "label": "Layout/Size", "type": "number", "default": 2, "min": 0, "max": 8 }},
    {{ "id": "p-style", "label": "Style", "type": "style-variant" }},
    {{ "id": "p-link", "label": "Link", "type": "link", "default": {{ "mode": "page", "url": "/home" }} }}
  ],
  "variants": {{ "p-style": [{{ "id": "v-ghost-{i}", "name": "Ghost" }}] }},
  "render": {{ "tag": "div", "classes": ["c{i}"], "children": [{children}] }},
  "classes": {{
    "c{i}": {{
      "css": "padding: @var_space; color: @var_ink; width: @raw<|calc(@raw<|100%|> - 2px)|>",
      "variants": {{ "v-ghost-{i}": {{ "variant": "v-ghost-{i}", "css": "background: none; @mode: v-ghost-{i}" }} }}
    }}
  }},
  "variables": {{
    "ink": {{ "name": "Colors/Ink", "type": "color", "value": {{ "type": "ref", "variableId": "brand" }},
              "modes": {{ "GhostMode": {{ "type": "color", "value": "#111" }} }} }},
    "brand": {{ "name": "Colors/Brand", "type": "color", "value": {{ "type": "color", "value": "#2563eb" }} }},
    "space": {{ "name": "Space/M", "type": "length", "value": {{ "type": "length", "value": 12 }} }}
  }}
}}"##,
            i = i,
            group = i % 7,
            children = children
        ));
    }

    format!(
        r#"{{ "_meta": {{ "componentCount": {} }}, "breakpoints": {{ "main": {{ "label": "Desktop" }} }}, "components": [{}] }}"#,
        count,
        components.join(",\n")
    )
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_parse(c: &mut Criterion) {
    let source = generate_library(200);
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("200_components", |b| {
        b.iter(|| parse_dump(black_box(&source)).unwrap())
    });

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let dump = parse_dump(&generate_library(200)).unwrap();
    let mut group = c.benchmark_group("generate");
    group.throughput(Throughput::Elements(dump.components.len() as u64));

    group.bench_function("sequential", |b| {
        let options = GenerateOptions {
            parallel: false,
            ..GenerateOptions::default()
        };
        b.iter(|| generate_docs(black_box(&dump), &options))
    });

    group.bench_function("parallel", |b| {
        let options = GenerateOptions::default();
        b.iter(|| generate_docs(black_box(&dump), &options))
    });

    group.finish();
}

fn bench_markdown(c: &mut Criterion) {
    let dump = parse_dump(&generate_library(200)).unwrap();
    let output = generate_docs(&dump, &GenerateOptions::default());

    c.bench_function("markdown_bundle", |b| {
        b.iter(|| DocBundle::build(black_box(&output.docs), &output.failures, &IndexOptions::default()))
    });
}

fn bench_escape_wrappers(c: &mut Criterion) {
    let nested = format!("{}{}{}", "@raw<|".repeat(64), "1px solid", "|>".repeat(64));

    c.bench_function("strip_escape_wrappers_64_deep", |b| {
        b.iter(|| strip_escape_wrappers(black_box(&nested)).len())
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_generate,
    bench_markdown,
    bench_escape_wrappers,
);
criterion_main!(benches);
