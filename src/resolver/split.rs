//! Format classification for previews

use crate::extractor::models::RawFormat;
use crate::resolver::models::{AudioFormat, VideoFormat};

/// Split raw probe formats into audio-only and video lists.
///
/// Filtering rules, in order:
/// - only whitelisted container extensions survive
/// - entries missing either codec field carry too little information and are dropped
/// - DRC variants duplicate their base stream and are dropped
///
/// Audio-only means an audio codec with no video codec. Everything else,
/// combined streams included, lands in the video list. Probe order is kept.
pub fn split_formats(
    formats: &[RawFormat],
    accepted_extensions: &[String],
) -> (Vec<AudioFormat>, Vec<VideoFormat>) {
    let mut audio = Vec::new();
    let mut video = Vec::new();

    for format in formats {
        if !accepted_extensions.iter().any(|ext| ext == &format.ext) {
            continue;
        }

        let (acodec, vcodec) = match (format.acodec.as_deref(), format.vcodec.as_deref()) {
            (Some(a), Some(v)) => (a, v),
            _ => continue,
        };

        if format.format_id.contains("drc") {
            continue;
        }

        if acodec != "none" && vcodec == "none" {
            audio.push(AudioFormat {
                format_id: format.format_id.clone(),
                ext: format.ext.clone(),
                acodec: acodec.to_string(),
                tbr: format.tbr,
            });
        } else {
            video.push(VideoFormat {
                format_id: format.format_id.clone(),
                ext: format.ext.clone(),
                vcodec: vcodec.to_string(),
                width: format.width,
                height: format.height,
            });
        }
    }

    (audio, video)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted() -> Vec<String> {
        vec!["m4a".to_string(), "webm".to_string(), "mp4".to_string()]
    }

    fn raw(format_id: &str, ext: &str, acodec: Option<&str>, vcodec: Option<&str>) -> RawFormat {
        RawFormat {
            format_id: format_id.to_string(),
            ext: ext.to_string(),
            acodec: acodec.map(str::to_string),
            vcodec: vcodec.map(str::to_string),
            width: None,
            height: None,
            tbr: None,
        }
    }

    #[test]
    fn test_audio_only_classified_as_audio() {
        let formats = vec![raw("140", "m4a", Some("mp4a.40.2"), Some("none"))];
        let (audio, video) = split_formats(&formats, &accepted());
        assert_eq!(audio.len(), 1);
        assert_eq!(audio[0].format_id, "140");
        assert!(video.is_empty());
    }

    #[test]
    fn test_video_only_classified_as_video() {
        let formats = vec![raw("137", "mp4", Some("none"), Some("avc1.640028"))];
        let (audio, video) = split_formats(&formats, &accepted());
        assert!(audio.is_empty());
        assert_eq!(video.len(), 1);
        assert_eq!(video[0].vcodec, "avc1.640028");
    }

    #[test]
    fn test_combined_stream_lands_in_video() {
        let formats = vec![raw("18", "mp4", Some("mp4a.40.2"), Some("avc1.42001E"))];
        let (audio, video) = split_formats(&formats, &accepted());
        assert!(audio.is_empty());
        assert_eq!(video.len(), 1);
        assert_eq!(video[0].format_id, "18");
    }

    #[test]
    fn test_unlisted_extension_dropped() {
        let formats = vec![
            raw("sb0", "mhtml", Some("none"), Some("none")),
            raw("140", "m4a", Some("mp4a.40.2"), Some("none")),
        ];
        let (audio, video) = split_formats(&formats, &accepted());
        assert_eq!(audio.len(), 1);
        assert!(video.is_empty());
    }

    #[test]
    fn test_missing_codec_fields_dropped() {
        let formats = vec![
            raw("601", "mp4", None, Some("avc1.640028")),
            raw("602", "mp4", Some("mp4a.40.2"), None),
        ];
        let (audio, video) = split_formats(&formats, &accepted());
        assert!(audio.is_empty());
        assert!(video.is_empty());
    }

    #[test]
    fn test_drc_variants_dropped() {
        let formats = vec![
            raw("140-drc", "m4a", Some("mp4a.40.2"), Some("none")),
            raw("140", "m4a", Some("mp4a.40.2"), Some("none")),
        ];
        let (audio, _) = split_formats(&formats, &accepted());
        assert_eq!(audio.len(), 1);
        assert_eq!(audio[0].format_id, "140");
    }

    #[test]
    fn test_probe_order_preserved() {
        let formats = vec![
            raw("249", "webm", Some("opus"), Some("none")),
            raw("140", "m4a", Some("mp4a.40.2"), Some("none")),
            raw("136", "mp4", Some("none"), Some("avc1.4d401f")),
            raw("137", "mp4", Some("none"), Some("avc1.640028")),
        ];
        let (audio, video) = split_formats(&formats, &accepted());
        let audio_ids: Vec<_> = audio.iter().map(|f| f.format_id.as_str()).collect();
        let video_ids: Vec<_> = video.iter().map(|f| f.format_id.as_str()).collect();
        assert_eq!(audio_ids, vec!["249", "140"]);
        assert_eq!(video_ids, vec!["136", "137"]);
    }

    #[test]
    fn test_empty_input() {
        let (audio, video) = split_formats(&[], &accepted());
        assert!(audio.is_empty());
        assert!(video.is_empty());
    }
}
