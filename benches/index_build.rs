use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_ccg_search::cards::Card;
use rust_ccg_search::index::{CardIndex, ImportOutcome};
use rust_ccg_search::links::resolve_links;
use rust_ccg_search::query::{FilterSet, QueryEngine, SearchMode};
use rust_ccg_search::EngineConfig;

const COLORS: [&str; 4] = ["Red", "Blue", "Green", "Yellow"];

fn generated_cards(count: usize) -> Vec<Card> {
    (0..count)
        .map(|i| {
            let mentioned = (i * 7 + 3) % count;
            Card::new(format!("GN/S{:02}-{:04}", i % 50, i), format!("G{i}"), "GN")
                .with_name(format!("Generated Card {i}"))
                .with_effect(format!(
                    "【自】このカードが舞台に置かれた時、「Generated Card {mentioned}」を1枚まで選ぶ。"
                ))
                .with_color(COLORS[i % COLORS.len()])
                .with_level((i % 4) as i64)
                .with_cost((i % 3) as i64)
                .with_power((i % 10) as i64 * 500)
                .with_trait("Music")
                .with_lowest_rarity(i % 3 == 0)
        })
        .collect()
}

fn bench_index_build(c: &mut Criterion) {
    let cards = generated_cards(2000);

    c.bench_function("index.build_2000", |b| {
        b.iter(|| CardIndex::build(black_box(&cards)));
    });

    let parts = CardIndex::build(&cards).export().unwrap();
    c.bench_function("index.import_2000", |b| {
        b.iter(|| match CardIndex::import(black_box(parts.clone()), cards.len()) {
            ImportOutcome::Imported(index) => index,
            ImportOutcome::Failed(err) => panic!("import failed: {err}"),
        });
    });
}

fn bench_link_resolution(c: &mut Criterion) {
    let cards = generated_cards(2000);

    c.bench_function("links.resolve_2000", |b| {
        b.iter(|| {
            let mut cards = cards.clone();
            resolve_links(&mut cards).unwrap();
            cards
        });
    });
}

fn bench_query(c: &mut Criterion) {
    let mut engine = QueryEngine::from_cards(generated_cards(2000), EngineConfig::default());
    let filters = FilterSet::new()
        .with_color("Red")
        .with_level(2)
        .with_unique_cards(true);

    c.bench_function("query.keyword_precise", |b| {
        b.iter(|| engine.search_by_keyword(Some(black_box("舞台")), SearchMode::Precise));
    });

    engine.search_by_keyword(Some("generated"), SearchMode::Fuzzy);
    c.bench_function("query.filter_attributes", |b| {
        b.iter(|| engine.filter_by_attributes(black_box(&filters)));
    });
}

criterion_group!(benches, bench_index_build, bench_link_resolution, bench_query);
criterion_main!(benches);
