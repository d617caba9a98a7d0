//! Library path of a season

/// Path of the removable unit for `season_number` of the series at `series_path`.
///
/// Without filesystem access only Sonarr's series folder is known, so the
/// series path is used as is. With access, seasons are assumed to live in
/// `Season NN` folders.
// TODO: read the season folder format from Sonarr's /config/naming instead of assuming "Season NN"
pub fn resolve_full_path(series_path: &str, season_number: i32, filesystem_access: bool) -> String {
    if !filesystem_access {
        return series_path.to_string();
    }
    format!("{}/Season {:02}", series_path, season_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_access_uses_series_path() {
        assert_eq!(resolve_full_path("/tv/Show", 3, false), "/tv/Show");
    }

    #[test]
    fn test_with_access_pads_single_digit() {
        assert_eq!(resolve_full_path("/tv/Show", 3, true), "/tv/Show/Season 03");
        assert_eq!(resolve_full_path("/tv/Show", 0, true), "/tv/Show/Season 00");
    }

    #[test]
    fn test_with_access_keeps_wide_numbers() {
        assert_eq!(resolve_full_path("/tv/Show", 12, true), "/tv/Show/Season 12");
        assert_eq!(resolve_full_path("/tv/Show", 2024, true), "/tv/Show/Season 2024");
    }

    #[test]
    fn test_negative_season_passes_through() {
        assert_eq!(resolve_full_path("/tv/Show", -1, true), "/tv/Show/Season -1");
    }
}
