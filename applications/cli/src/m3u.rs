/// Extended M3U playlist codec
use mixtape_core::{ExportItem, PlaylistCodec};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct M3uCodec;

impl M3uCodec {
    pub fn new() -> Self {
        Self
    }
}

impl PlaylistCodec for M3uCodec {
    /// Render `#EXTM3U` with one `#EXTINF` line and one path line per item
    ///
    /// Unknown durations are written as `-1`.
    fn encode(&self, items: &[ExportItem]) -> String {
        let mut content = String::from("#EXTM3U\n");

        for item in items {
            if item.duration_seconds > 0.0 {
                let _ = writeln!(content, "#EXTINF:{},{}", item.duration_seconds, item.name);
            } else {
                let _ = writeln!(content, "#EXTINF:-1,{}", item.name);
            }
            content.push_str(&item.resolved_path);
            content.push('\n');
        }

        content
    }

    /// Extract the base name of every path line
    ///
    /// Blank lines and lines starting with `#` are skipped. Both `/` and `\`
    /// count as separators.
    fn decode(&self, content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.rsplit(|c| c == '/' || c == '\\').next())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item(name: &str, duration: f64, path: &str) -> ExportItem {
        ExportItem {
            name: name.to_string(),
            file_name: format!("{}.mp3", name),
            duration_seconds: duration,
            resolved_path: path.to_string(),
        }
    }

    #[test]
    fn test_encode_extended_m3u() {
        let items = vec![
            create_test_item("intro", 184.0, "/music/intro.mp3"),
            create_test_item("jam", 61.5, "jam.mp3"),
            create_test_item("unknown", 0.0, "C:\\Music\\unknown.mp3"),
        ];

        let content = M3uCodec::new().encode(&items);
        assert_eq!(
            content,
            "#EXTM3U\n\
             #EXTINF:184,intro\n/music/intro.mp3\n\
             #EXTINF:61.5,jam\njam.mp3\n\
             #EXTINF:-1,unknown\nC:\\Music\\unknown.mp3\n"
        );
    }

    #[test]
    fn test_encode_empty_playlist() {
        assert_eq!(M3uCodec::new().encode(&[]), "#EXTM3U\n");
    }

    #[test]
    fn test_decode_keeps_base_names() {
        let content = "#EXTM3U\r\n\
                       #EXTINF:184,intro\r\n\
                       /music/intro.mp3\r\n\
                       \r\n\
                       # comment\n\
                       D:\\Sets\\jam.flac\n\
                       outro.ogg\n";

        let names = M3uCodec::new().decode(content);
        assert_eq!(names, vec!["intro.mp3", "jam.flac", "outro.ogg"]);
    }
}
