/// Strips `\r\n` sequences and apostrophes from a plot; a missing plot becomes empty
pub fn clean_plot(plot: Option<&str>) -> String {
    plot.unwrap_or_default().replace("\r\n", "").replace('\'', "")
}

/// Turns `Action|Sci-Fi` into `Action Sci-Fi`
pub fn clean_genres(genres: &str) -> String {
    genres.replace('|', " ")
}
