//! Extraction and normalization hot paths

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use product_scraper_lib::domain::detect_currency;
use product_scraper_lib::infrastructure::parsing::{
    parse_document, site_selectors, ProductPageParser,
};
use product_scraper_lib::infrastructure::scraping_utils::{clean_price, clean_text, validate_url};

fn product_page() -> String {
    let filler: String = (0..200)
        .map(|i| format!("<li class=\"related\"><a href=\"/dp/{i}\">Related item {i}</a></li>"))
        .collect();
    format!(
        r#"<html><head><title>Store</title></head><body>
        <ul>{filler}</ul>
        <span id="productTitle">  Stainless Steel   Kettle 1.7L </span>
        <span class="a-price"><span class="a-offscreen">$39.99</span></span>
        </body></html>"#
    )
}

fn bench_extraction(c: &mut Criterion) {
    let body = product_page();
    let parser = ProductPageParser::with_selectors(&site_selectors("amazon.com")).unwrap();

    c.bench_function("parse_and_extract_amazon_page", |b| {
        b.iter(|| {
            let document = parse_document(black_box(&body)).unwrap();
            parser.parse(&document)
        })
    });

    let document = parse_document(&body).unwrap();
    c.bench_function("extract_from_parsed_page", |b| {
        b.iter(|| parser.parse(black_box(&document)))
    });
}

fn bench_normalization(c: &mut Criterion) {
    c.bench_function("clean_text", |b| {
        b.iter(|| clean_text(black_box("  Stainless\tSteel \n\n Kettle\u{1}  1.7L ")))
    });
    c.bench_function("clean_price_and_currency", |b| {
        b.iter(|| {
            let price = clean_price(black_box("Precio: 1,299.00 MXN con envío")).unwrap_or_default();
            detect_currency(&price, "mercadolibre.com.mx")
        })
    });
    c.bench_function("validate_url", |b| {
        b.iter(|| validate_url(black_box("https://www.amazon.com/dp/B08N5WRWNW?th=1#reviews")))
    });
}

criterion_group!(benches, bench_extraction, bench_normalization);
criterion_main!(benches);
