//! Result screen data
//!
//! Score bands, each with a result image and a pool of comments; the shell
//! shows the band's image and one randomly picked comment when the round
//! ends.

use rand::Rng;

/// One score band of the result screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultPack {
    pub min: u32,
    /// Inclusive upper bound; `None` means open-ended
    pub max: Option<u32>,
    pub image: &'static str,
    pub comments: &'static [&'static str],
}

pub const RESULT_PACKS: &[ResultPack] = &[
    ResultPack {
        min: 0,
        max: Some(100),
        image: "assets/result/0-100.png",
        comments: &[
            "Just warming up! Go for combos next time.",
            "Stay calm and keep tapping.",
            "You'll climb from here!",
        ],
    },
    ResultPack {
        min: 101,
        max: Some(200),
        image: "assets/result/101-200.png",
        comments: &[
            "Nice! Your aim is sharpening.",
            "You're holding those combos!",
            "Keep it up, keep it up.",
        ],
    },
    ResultPack {
        min: 201,
        max: Some(300),
        image: "assets/result/201-300.png",
        comments: &[
            "Strong. Those reflexes are tuned.",
            "You're keeping the fever rolling!",
            "One more level up in you!",
        ],
    },
    ResultPack {
        min: 301,
        max: Some(400),
        image: "assets/result/301-400.png",
        comments: &[
            "Expert tier. Fast fingers.",
            "A true combo artisan.",
            "Scary consistency.",
        ],
    },
    ResultPack {
        min: 401,
        max: Some(500),
        image: "assets/result/401-500.png",
        comments: &[
            "One step from godhood.",
            "Barely any misses!",
            "What is going on with those hands?",
        ],
    },
    ResultPack {
        min: 501,
        max: None,
        image: "assets/result/501plus.png",
        comments: &[
            "Monstrous. Champion.",
            "World-record material.",
            "Is there a GPU in your finger?",
        ],
    },
];

/// Pack whose band contains the score
pub fn pack_for_score(score: u32) -> &'static ResultPack {
    RESULT_PACKS
        .iter()
        .find(|p| score >= p.min && p.max.is_none_or(|max| score <= max))
        .unwrap_or(&RESULT_PACKS[0])
}

/// Pick one comment from the pack at random
pub fn pick_comment<R: Rng>(pack: &ResultPack, rng: &mut R) -> &'static str {
    pack.comments[rng.random_range(0..pack.comments.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(pack_for_score(0).min, 0);
        assert_eq!(pack_for_score(100).min, 0);
        assert_eq!(pack_for_score(101).min, 101);
        assert_eq!(pack_for_score(500).min, 401);
        assert_eq!(pack_for_score(501).min, 501);
        assert_eq!(pack_for_score(u32::MAX).min, 501);
    }

    #[test]
    fn test_bands_cover_all_scores() {
        for score in (0..600).chain([5_000, 100_000]) {
            let pack = pack_for_score(score);
            assert!(score >= pack.min);
            if let Some(max) = pack.max {
                assert!(score <= max);
            }
        }
    }

    #[test]
    fn test_comment_comes_from_pack() {
        let mut rng = Pcg32::seed_from_u64(3);
        let pack = pack_for_score(250);
        for _ in 0..20 {
            let comment = pick_comment(pack, &mut rng);
            assert!(pack.comments.contains(&comment));
        }
    }
}
