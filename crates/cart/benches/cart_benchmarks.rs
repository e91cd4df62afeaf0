use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use storefront_cart::{CartAction, CartState, CartStore};
use storefront_catalog::{CatalogProduct, ListProduct, Sale};
use storefront_core::{ProductId, Reducer};

fn catalog(n: usize) -> Vec<CatalogProduct> {
    (0..n)
        .map(|i| {
            ListProduct::new(
                format!("p{i}"),
                format!("Product {i}"),
                Sale::new("AED", 20.0 + i as f64, 15.0 + i as f64 * 0.25),
            )
            .into()
        })
        .collect()
}

/// Filled cart of `n` distinct products.
fn filled(n: usize) -> CartState {
    let actions: Vec<CartAction> = catalog(n).into_iter().map(CartAction::AddToCart).collect();
    CartState::new().reduce_all(actions.iter())
}

fn bench_transitions_by_cart_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("cart_transition");

    for size in [1usize, 10, 50, 200] {
        let state = filled(size);
        let last = ProductId::new(format!("p{}", size - 1));
        let readd = CartAction::AddToCart(catalog(size).pop().expect("non-empty catalog"));
        let update = CartAction::UpdateQuantity {
            product_id: last.clone(),
            quantity: 3,
        };
        let remove = CartAction::RemoveFromCart(last);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("add_existing", size), &state, |b, s| {
            b.iter(|| black_box(s.reduce(black_box(&readd))))
        });
        group.bench_with_input(BenchmarkId::new("update_quantity", size), &state, |b, s| {
            b.iter(|| black_box(s.reduce(black_box(&update))))
        });
        group.bench_with_input(BenchmarkId::new("remove", size), &state, |b, s| {
            b.iter(|| black_box(s.reduce(black_box(&remove))))
        });
    }

    group.finish();
}

fn bench_store_session(c: &mut Criterion) {
    let products = catalog(20);

    c.bench_function("store_session_100_actions", |b| {
        b.iter(|| {
            let mut store = CartStore::new();
            for (i, product) in products.iter().cycle().take(100).enumerate() {
                store.add_to_cart(product.clone());
                if i % 7 == 0 {
                    store.decrement(&ProductId::new(format!("p{}", i % 20)));
                }
            }
            black_box(store.state().total())
        })
    });
}

criterion_group!(benches, bench_transitions_by_cart_size, bench_store_session);
criterion_main!(benches);
