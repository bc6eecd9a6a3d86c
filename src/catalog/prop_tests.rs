use super::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn wrapped_ids_stay_in_collection(start in 1u32..20_000, count in 0u32..80) {
        let mut rng = StdRng::seed_from_u64(0);
        for c in &COLLECTIONS {
            for nft in collection_nfts(c, Some(count), Some(start), &mut rng) {
                prop_assert!(nft.token_id >= 1 && nft.token_id <= c.total_supply);
            }
        }
    }

    #[test]
    fn listing_price_never_below_floor(token_id in 1u32..=5555) {
        let c = &COLLECTIONS[0];
        let nft = nft_listing(c, token_id);
        prop_assert!(nft.price >= c.floor_price);
        prop_assert_eq!(nft.listed, token_id % 3 == 0);
    }

    #[test]
    fn random_pages_stay_in_collection(seed in any::<u64>(), count in 1u32..=50) {
        let mut rng = StdRng::seed_from_u64(seed);
        let c = &COLLECTIONS[1];
        let page = collection_nfts(c, Some(count), None, &mut rng);
        prop_assert_eq!(page.len() as u32, count);
        prop_assert!(page.iter().all(|n| n.token_id >= 1 && n.token_id <= c.total_supply));
    }
}
