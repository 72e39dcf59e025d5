use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use markweave_engine::prelude::*;
use std::hint::black_box;

fn chat_message(paragraphs: usize) -> String {
    let mut out = String::from(
        "<thinking title=\"Plan\">Work through the *steps* below.</thinking>\n\n## Answer\n\n",
    );
    for i in 0..paragraphs {
        out.push_str(&format!(
            "Step {i}: see [docs](https://example.com/{i}) and run `check {i}`, \
             **not** ~~guess~~ at https://example.com/more.\n\n\
             - [x] item one\n- [ ] item *two*\n\n"
        ));
    }
    out.push_str("| a | b |\n| --- | --- |\n| 1 | 2 |\n");
    out
}

fn bench_render(c: &mut Criterion) {
    let theme = Theme::default();
    let mut group = c.benchmark_group("render");
    for size in [1usize, 10, 100] {
        let source = chat_message(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("document", size), &source, |b, source| {
            let renderer = Renderer::new(&theme);
            b.iter(|| renderer.render(black_box(source)));
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let source = chat_message(50);
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("syntax_tree", |b| {
        b.iter(|| markweave_syntax::parse(black_box(&source)));
    });
    group.finish();
}

fn bench_fade(c: &mut Criterion) {
    let theme = Theme::default();
    let doc = Renderer::new(&theme).render(&chat_message(1));
    let Block::Paragraph { content } = &doc.blocks[2] else {
        panic!("unexpected block layout");
    };
    c.bench_function("fade/apply", |b| {
        b.iter(|| {
            apply_fade(
                black_box(content.clone()),
                theme.colors.text,
                20,
                black_box(1.0),
            )
        });
    });
}

criterion_group!(benches, bench_render, bench_parse, bench_fade);
criterion_main!(benches);
