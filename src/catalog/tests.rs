use super::*;
use chrono::TimeZone;

#[test]
fn test_trending_has_both_collections_in_order() {
    let trending = trending_collections();

    assert_eq!(trending.len(), 2);
    assert_eq!(trending[0].id, "hypio-babies");
    assert_eq!(trending[0].contract, "0x63eb9d77D083cA10C304E28d5191321977fd0Bfb");
    assert_eq!(trending[0].floor_price, 60.0);
    assert_eq!(trending[1].id, "pip-friends");
    assert_eq!(trending[1].floor_price, 25.0);
    assert_eq!(trending[1].chain_id, 999);
}

#[test]
fn test_trending_serializes_expected_keys() {
    let value = serde_json::to_value(trending_collections()).unwrap();
    let entries = value.as_array().unwrap();

    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert!(entry.get("name").is_some());
        assert!(entry.get("contract").is_some());
        assert!(entry.get("floor_price").is_some());
        assert_eq!(entry["preview_nfts"].as_array().unwrap().len(), 8);
    }
}

#[test]
fn test_preview_colors_come_from_palette() {
    for c in &COLLECTIONS {
        let entry = TrendingCollection::from(c);
        for nft in &entry.preview_nfts {
            assert!(
                c.preview_palette.iter().any(|color| nft.image.contains(&format!("/{}/", color))),
                "unexpected color in {}",
                nft.image
            );
        }
    }
}

#[test]
fn test_color_seed_is_sha256_prefix() {
    // sha256("abc") = ba7816bf...
    assert_eq!(color_seed("abc"), 0xba7816bf);
}

#[test]
fn test_find_collection_by_id_or_slug() {
    assert_eq!(find_collection("hypio").unwrap().id, "hypio-babies");
    assert_eq!(find_collection("pip-friends").unwrap().slug, "pipf");
    assert!(find_collection("unknown").is_none());
    assert!(collection("pipf").is_some());
}

#[test]
fn test_listing_formulas() {
    let hypio = &COLLECTIONS[0];
    let nft = nft_listing(hypio, 123);

    assert_eq!(nft.id, "123");
    assert_eq!(nft.name, "Wealthy Hypio Babies #123");
    assert_eq!(nft.price, 71.5);
    assert_eq!(nft.last_sale, 70.9);
    assert!(nft.listed);
    assert_eq!(nft.rarity_rank, 123);
    assert_eq!(nft.traits[0], Trait::new("Background", "City"));
    assert_eq!(nft.traits[1], Trait::new("Body", "Platinum"));
    assert_eq!(nft.traits[2], Trait::new("Eyes", "Yellow"));
    assert!(nft.image.starts_with("https://via.placeholder.com/400x400/"));
    assert!(nft.image.ends_with("?text=Hypio+123"));
}

#[test]
fn test_collection_nfts_clamps_count() {
    let mut rng = StdRng::seed_from_u64(7);
    let hypio = &COLLECTIONS[0];

    assert_eq!(collection_nfts(hypio, None, None, &mut rng).len(), 24);
    assert_eq!(collection_nfts(hypio, Some(500), None, &mut rng).len(), 50);
    assert_eq!(collection_nfts(hypio, Some(0), None, &mut rng).len(), 1);
}

#[test]
fn test_collection_nfts_wraps_past_supply() {
    let mut rng = StdRng::seed_from_u64(7);
    let hypio = &COLLECTIONS[0];

    let page = collection_nfts(hypio, Some(4), Some(5554), &mut rng);
    let ids: Vec<u32> = page.iter().map(|n| n.token_id).collect();

    assert_eq!(ids, vec![5554, 5555, 2, 3]);
}

#[test]
fn test_nft_detail_is_deterministic() {
    let pip = &COLLECTIONS[1];
    let first = nft_detail(pip, 42).unwrap();
    let second = nft_detail(pip, 42).unwrap();

    assert_eq!(first.traits, second.traits);
    assert_eq!(first.price, second.price);
    assert_eq!(first.listed, second.listed);
    assert_eq!(first.traits.len(), 8);
    assert!(first.price >= round2(25.0 * 0.85) && first.price <= round2(25.0 * 2.5));
    assert!(first.last_sale < first.price);
}

#[test]
fn test_nft_detail_rejects_out_of_range() {
    let hypio = &COLLECTIONS[0];
    assert!(nft_detail(hypio, 0).is_none());
    assert!(nft_detail(hypio, 5556).is_none());
    assert!(nft_detail(hypio, 5555).is_some());
}

#[test]
fn test_nft_detail_has_no_owner() {
    let value = serde_json::to_value(nft_detail(&COLLECTIONS[0], 1).unwrap()).unwrap();
    assert!(value.get("owner").is_none());
}

#[test]
fn test_launchpad_dates_relative_to_now() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let projects = launchpad(now);

    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0].status, LaunchStatus::Upcoming);
    assert_eq!(projects[0].launch_date, now + Duration::days(2));
    assert_eq!(projects[1].status, LaunchStatus::SoldOut);
    assert_eq!(projects[1].minted, projects[1].total_supply);
    assert_eq!(projects[2].launch_date, now);

    let value = serde_json::to_value(&projects[1]).unwrap();
    assert_eq!(value["status"], "sold_out");
    assert!(value.get("whitelist_spots").is_none());
}

#[test]
fn test_activities_are_marked_simulated() {
    let now = Utc::now();
    let mut rng = StdRng::seed_from_u64(1);
    let feed = activities(&mut rng, now);

    assert_eq!(feed.len(), 50);
    for activity in &feed {
        assert!(activity.simulated);
        assert!((45.0..=150.0).contains(&activity.price));
        assert!(activity.timestamp < now);
        assert!(activity.timestamp >= now - Duration::hours(24));
    }

    let value = serde_json::to_value(&feed[0]).unwrap();
    assert!(value.get("tx_hash").is_none());
    assert!(value.get("from_address").is_none());
    assert!(value.get("type").is_some());
}

#[test]
fn test_apply_remote_overrides_fixture() {
    let mut nft = nft_listing(&COLLECTIONS[0], 5);
    nft.apply_remote(RemoteMetadata {
        name: Some("Remote Name".to_string()),
        image: None,
    });

    assert_eq!(nft.name, "Remote Name");
    assert!(nft.image.contains("placeholder"));
}

fn hypio() -> &'static Collection {
    find_collection("hypio").unwrap()
}

fn filter(s: &str) -> TraitFilter {
    s.parse().unwrap()
}

#[test]
fn test_search_by_token_id() {
    let results = search_nfts(hypio(), "42", &[], None);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].token_id, 42);

    assert!(search_nfts(hypio(), "0", &[], None).is_empty());
    assert!(search_nfts(hypio(), "5556", &[], None).is_empty());
}

#[test]
fn test_search_by_trait_text_ignores_case() {
    let results = search_nfts(hypio(), "OCEAN", &[], None);

    assert_eq!(results.len(), 20);
    assert_eq!(results[0].token_id, 7);
    assert_eq!(results[19].token_id, 140);
    for nft in &results {
        assert!(nft.traits.contains(&Trait::new("Background", "Ocean")));
    }
}

#[test]
fn test_search_by_name_respects_count_limit() {
    assert_eq!(search_nfts(hypio(), "hypio", &[], Some(500)).len(), 50);
    assert_eq!(search_nfts(hypio(), "hypio", &[], Some(0)).len(), 1);
    assert!(search_nfts(hypio(), "no such thing", &[], None).is_empty());
}

#[test]
fn test_search_applies_exact_trait_filters() {
    let both = search_nfts(hypio(), "", &[filter("background:ocean"), filter("Body:Gold")], Some(5));
    let ids: Vec<u32> = both.iter().map(|n| n.token_id).collect();
    assert_eq!(ids, vec![7, 14, 21, 28, 35]);

    let impossible = search_nfts(hypio(), "", &[filter("Background:Ocean"), filter("Eyes:Green")], None);
    assert!(impossible.is_empty());

    assert!(search_nfts(hypio(), "1", &[filter("Background:Ocean")], None).is_empty());
    assert!(search_nfts(hypio(), "", &[filter("Background:Oce")], None).is_empty());
}

#[test]
fn test_trait_filter_parsing() {
    assert_eq!(
        filter(" Background : Ocean "),
        TraitFilter { trait_type: "Background".to_string(), value: "Ocean".to_string() }
    );
    assert!("Background".parse::<TraitFilter>().is_err());
    assert!(":Ocean".parse::<TraitFilter>().is_err());
    assert!("Background:".parse::<TraitFilter>().is_err());
}

#[test]
fn test_collection_traits_lists_sorted_values() {
    let traits = collection_traits(hypio());

    assert_eq!(traits.len(), 3);
    assert_eq!(
        traits["Background"],
        vec!["City", "Desert", "Forest", "Galaxy", "Mountain", "Ocean", "Sunset"]
    );
    assert_eq!(traits["Eyes"].len(), 7);
    assert!(traits["Body"].contains(&"Platinum".to_string()));
}
