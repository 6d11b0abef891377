use criterion::{criterion_group, criterion_main, Criterion};
use steam_tradeoffer_window::selection::{select, SelectionContext, SelectionOptions, SelectionRequest};
use steam_tradeoffer_window::{
    Inventory,
    InventoryContext,
    InventoryItem,
    InventoryRepository,
    SideFilter,
    SteamID,
    TradeSide,
    TradeStatus,
    OfferSlot,
};

fn inventory(size: u64) -> Inventory {
    let names = ["Refined Metal", "Reclaimed Metal", "Scrap Metal", "Mann Co. Supply Crate Key", "Team Captain"];
    let items = (0..size)
        .map(|assetid| InventoryItem::new(440, 2, assetid + 1, names[(assetid % 5) as usize]));

    Inventory::from_items(items).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let you = SteamID::from(76561198000000001);
    let them = SteamID::from(76561198000000002);
    let mut inventories = InventoryRepository::new();
    let mut status = TradeStatus::new();
    let options = SelectionOptions::default();

    inventories.insert(you, 440, 2, inventory(3000));
    // a large offer already in place
    status.me.assets = (1..=1000).map(|assetid| OfferSlot::from((440, 2, assetid))).collect();

    let ctx = SelectionContext {
        inventories: &inventories,
        status: &status,
        options: &options,
        you,
        them,
        active: Some(InventoryContext::new(TradeSide::You, 440, 2)),
    };
    let count = SelectionRequest::count(200, 0, SideFilter::You);
    let count_reversed = SelectionRequest::count(200, -1, SideFilter::You);
    let value = SelectionRequest::value(150.0, 0, SideFilter::You);
    let recent = SelectionRequest::recent(0, SideFilter::You);
    
    c.bench_function("select 200 items", |b| b.iter(|| {
        select(&ctx, &count)
    }));
    
    c.bench_function("select 200 items from end", |b| b.iter(|| {
        select(&ctx, &count_reversed)
    }));
    
    c.bench_function("select 150 refined", |b| b.iter(|| {
        select(&ctx, &value)
    }));
    
    c.bench_function("select recent items", |b| b.iter(|| {
        select(&ctx, &recent)
    }));
}

criterion_group!{
    name = benches;
    config = Criterion::default().sample_size(100);
    targets = criterion_benchmark
}

criterion_main!(benches);
