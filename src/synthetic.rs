use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::video::{PerformanceMetrics, ScoredVideo};

const TOPICS: [&str; 8] = [
    "Shorts strategy",
    "Thumbnail teardown",
    "AI tools roundup",
    "Channel audit",
    "SEO basics",
    "Editing workflow",
    "Live Q&A",
    "Growth experiment",
];

/// A seeded, plausible channel: view counts spread around a median, with
/// scores derived from how far each video sits from that median.
pub fn generate_synthetic_channel(channel_id: &str, count: usize, seed: u64) -> Vec<ScoredVideo> {
    let mut rng = StdRng::seed_from_u64(seed);
    let median_views = rng.gen_range(2_000.0..200_000.0_f64);

    (0..count)
        .map(|idx| {
            let ratio = sample_ratio(&mut rng);
            let views = (median_views * ratio).round().max(0.0) as u64;
            let likes = (views as f64 * rng.gen_range(0.01..0.06)).round() as u64;
            let comments = (views as f64 * rng.gen_range(0.001..0.01)).round() as u64;

            let absolute_score = absolute_from_views(views, &mut rng);
            let relative_score = relative_from_ratio(ratio);

            let mut video = ScoredVideo::new(
                format!("{}_{}", channel_id, idx),
                format!("vid{:06}", idx),
                channel_id,
            )
            .with_scores(absolute_score, relative_score);
            video.title = format!("{} #{}", TOPICS[idx % TOPICS.len()], idx + 1);
            video.view_count = Some(views);
            video.like_count = Some(likes);
            video.comment_count = Some(comments);
            video.relative_ratio = Some(round2(ratio));
            video.performance_metrics =
                Some(PerformanceMetrics::from_counts(views, likes, comments));
            video
        })
        .collect()
}

fn sample_ratio(rng: &mut StdRng) -> f64 {
    // Long right tail: most videos land near the median, a few break out.
    let base: f64 = rng.gen_range(0.2..1.6);
    if rng.gen::<f64>() < 0.1 {
        base * rng.gen_range(2.0..8.0)
    } else {
        base
    }
}

fn absolute_from_views(views: u64, rng: &mut StdRng) -> f64 {
    let log_views = ((views as f64) + 1.0).log10();
    let score = (log_views - 2.0) / 5.0 * 100.0 + rng.gen_range(-5.0..5.0);
    round1(score.clamp(0.0, 100.0))
}

fn relative_from_ratio(ratio: f64) -> f64 {
    let score = 50.0 + 25.0 * ratio.max(1e-3).log2();
    round1(score.clamp(0.0, 100.0))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
