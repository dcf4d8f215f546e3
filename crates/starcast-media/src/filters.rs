//! FFmpeg filter-graph builders.
//!
//! Pure string assembly from numeric parameters; no subprocess execution.
//! Keeping these side-effect-free makes offsets and durations verifiable
//! without running FFmpeg.

/// Build the seamless-loop crossfade graph.
///
/// The source is split three ways: the full body plays through, while the
/// last `fade_duration` seconds dissolve into the first `fade_duration`
/// seconds, producing the joint that makes the repeat invisible. The joint
/// is concatenated after the body; the final output label is `[out]`.
///
/// Caller guarantees `0 < fade_duration < source_duration`.
pub fn build_crossfade_filter(source_duration: f64, fade_duration: f64) -> String {
    let tail_start = source_duration - fade_duration;
    format!(
        "[0:v]split=3[body][head][tail];\
         [tail]trim=start={tail_start:.3},setpts=PTS-STARTPTS[fadeout];\
         [head]trim=end={fade_duration:.3},setpts=PTS-STARTPTS[fadein];\
         [fadeout][fadein]xfade=transition=fade:duration={fade_duration:.3}:offset=0[joint];\
         [body][joint]concat=n=2:v=1[out]"
    )
}

/// Scale filter for thumbnail extraction.
pub fn filter_thumbnail(width: u32) -> String {
    format!("scale={}:-2", width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossfade_offsets() {
        let filter = build_crossfade_filter(10.0, 2.0);
        assert!(filter.contains("trim=start=8.000"));
        assert!(filter.contains("trim=end=2.000"));
        assert!(filter.contains("xfade=transition=fade:duration=2.000:offset=0"));
        assert!(filter.contains("concat=n=2:v=1[out]"));
    }

    #[test]
    fn test_crossfade_consumes_each_split_once() {
        let filter = build_crossfade_filter(245.04, 2.0);
        // Each split leg is referenced exactly once downstream
        for label in ["[body]", "[head]", "[tail]"] {
            assert_eq!(filter.matches(label).count(), 2, "{label} must appear twice");
        }
        assert_eq!(filter.matches("[0:v]").count(), 1);
    }

    #[test]
    fn test_thumbnail_filter() {
        assert_eq!(filter_thumbnail(480), "scale=480:-2");
    }
}
