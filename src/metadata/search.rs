//! Combined movie + TV search.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::metadata::provider::{MediaKind, MetadataProvider, SearchCandidate, SearchHit};
use crate::metadata::year_of;

/// Search movies and TV concurrently and merge the results.
///
/// Only candidates with both a poster and a date are kept. The union is
/// movies first, then TV, each in provider order, stable-sorted by
/// descending popularity so ties keep that order.
pub async fn search_media(provider: &dyn MetadataProvider, query: &str) -> Result<Vec<SearchHit>> {
    let (movies, shows) = tokio::try_join!(provider.search_movie(query), provider.search_tv(query))
        .map_err(|e| Error::upstream(provider.name(), format!("{e:#}")))?;

    Ok(merge_results(movies, shows))
}

/// Filter, tag, and rank raw search candidates.
pub fn merge_results(movies: Vec<SearchCandidate>, shows: Vec<SearchCandidate>) -> Vec<SearchHit> {
    let tagged = movies
        .into_iter()
        .map(|c| (MediaKind::Movie, c))
        .chain(shows.into_iter().map(|c| (MediaKind::Tv, c)));

    let mut hits: Vec<SearchHit> = tagged
        .filter_map(|(kind, c)| {
            let poster_url = c.poster_url.filter(|p| !p.is_empty())?;
            let date = c.date.filter(|d| !d.is_empty())?;
            Some(SearchHit {
                id: c.id,
                kind,
                title: c.title,
                year: year_of(&date),
                poster_url,
                popularity: c.popularity,
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.popularity
            .partial_cmp(&a.popularity)
            .unwrap_or(Ordering::Equal)
    });
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u64, popularity: f64) -> SearchCandidate {
        SearchCandidate {
            id,
            title: format!("Title {id}"),
            date: Some("2008-07-16".into()),
            poster_url: Some(format!("https://image.tmdb.org/t/p/w200/{id}.jpg")),
            popularity,
        }
    }

    #[test]
    fn sorts_by_descending_popularity() {
        let hits = merge_results(
            vec![candidate(1, 10.0), candidate(2, 50.0)],
            vec![candidate(3, 30.0)],
        );
        let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(hits[1].kind, MediaKind::Tv);
    }

    #[test]
    fn ties_keep_provider_order() {
        let hits = merge_results(
            vec![candidate(1, 5.0), candidate(2, 5.0)],
            vec![candidate(3, 5.0), candidate(4, 9.0)],
        );
        let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![4, 1, 2, 3]);
    }

    #[test]
    fn drops_results_without_poster_or_date() {
        let mut no_poster = candidate(1, 99.0);
        no_poster.poster_url = None;
        let mut no_date = candidate(2, 98.0);
        no_date.date = Some(String::new());
        let hits = merge_results(vec![no_poster, no_date], vec![candidate(3, 1.0)]);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
        assert_eq!(hits[0].year, "2008");
    }
}
