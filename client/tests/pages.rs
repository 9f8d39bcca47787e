mod common;

use common::*;
use filmtracker_client::viewmodel::{
    AdminViewModel, DetailViewModel, HomeViewModel, LoadState, PersonalizedTab, ProfileViewModel,
    RecommendationsViewModel, WatchListViewModel,
};
use filmtracker_client::Method;
use filmtracker_shared::{MediaItem, MediaRef, MovieForm, WatchState};
use serde_json::json;

// ── Home ──

#[tokio::test]
async fn home_survives_failed_extras() {
    let h = signed_in();
    h.transport
        .get("/movies/popular/", page(vec![movie_json(1, "Heat")], 1));
    h.transport
        .json(Method::Get, "/recommendations/", 500, json!({ "detail": "boom" }));
    h.transport
        .reply(Method::Get, "/user/stats/", Reply::Fail("offline".into()));
    let vm = HomeViewModel::new(h.app.services.clone());

    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(state.popular.len(), 1);
    assert!(state.recommendations.is_empty());
    assert!(state.stats.is_none());
}

#[tokio::test]
async fn home_skips_personal_data_when_anonymous() {
    let h = anonymous();
    h.transport.get("/movies/popular/", page(vec![], 0));
    let vm = HomeViewModel::new(h.app.services.clone());

    vm.load().await;

    assert_eq!(vm.state().get().load, LoadState::Ready);
    assert_eq!(h.transport.requests().len(), 1);
}

#[tokio::test]
async fn home_fails_without_popular() {
    let h = signed_in();
    h.transport
        .reply(Method::Get, "/movies/popular/", Reply::Fail("offline".into()));
    let vm = HomeViewModel::new(h.app.services.clone());

    vm.load().await;

    assert!(vm.state().get().load.error().is_some());
    assert_eq!(h.transport.requests().len(), 1);
}

#[tokio::test]
async fn home_collects_stats() {
    let h = signed_in();
    h.transport.get("/movies/popular/", page(vec![], 0));
    h.transport
        .get("/recommendations/", page(vec![movie_json(4, "Sicario")], 1));
    h.transport.get(
        "/user/stats/",
        json!({
            "total_watched": 12,
            "average_rating": 7.5,
            "reviews_written": 3,
            "movies_watched": 9,
            "series_watched": 3,
            "watch_status_distribution": { "planned": 4, "watching": 1, "watched": 12 }
        }),
    );
    let vm = HomeViewModel::new(h.app.services.clone());

    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.recommendations[0].title, "Sicario");
    let stats = state.stats.unwrap();
    assert_eq!(stats.total_watched, 12);
    assert_eq!(stats.watch_status_distribution.planned, 4);
}

#[tokio::test]
async fn home_forgets_personal_data_after_logout() {
    let h = signed_in();
    h.transport.get("/movies/popular/", page(vec![movie_json(1, "Heat")], 1));
    h.transport
        .get("/recommendations/", page(vec![movie_json(4, "Sicario")], 1));
    h.transport.get("/user/stats/", json!({ "total_watched": 7 }));
    let vm = HomeViewModel::new(h.app.services.clone());

    vm.load().await;
    assert!(vm.state().get().stats.is_some());

    h.app.auth.logout();
    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(state.popular.len(), 1);
    assert!(state.recommendations.is_empty());
    assert!(state.stats.is_none());
    assert_eq!(h.transport.requests_to(Method::Get, "/user/stats/").len(), 1);
}

// ── Detail ──

fn detail_routes(h: &Harness) {
    h.transport.get(&format!("/movies/{}/", id(1)), movie_json(1, "Heat"));
    h.transport
        .get("/reviews/", page(vec![review_json(10, 1, "Tense.")], 1));
}

#[tokio::test]
async fn detail_renders_without_rating_or_status() {
    let h = signed_in();
    detail_routes(&h);
    h.transport
        .json(Method::Get, "/ratings/", 500, json!({ "detail": "boom" }));
    h.transport
        .reply(Method::Get, "/watch-status/", Reply::Fail("offline".into()));
    let vm = DetailViewModel::new(h.app.services.clone(), MediaRef::Movie(id(1)));

    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(state.item.as_ref().unwrap().title(), "Heat");
    let Some(MediaItem::Movie(movie)) = &state.item else {
        panic!("expected a movie");
    };
    assert_eq!(movie.directors[0].full_name(), "Michael Mann");
    assert_eq!(movie.actors.len(), 2);
    assert_eq!(state.reviews.len(), 1);
    assert_eq!(state.user_rating, None);
    assert_eq!(state.watch_status, None);
}

#[tokio::test]
async fn detail_for_anonymous_skips_personal_calls() {
    let h = anonymous();
    detail_routes(&h);
    let vm = DetailViewModel::new(h.app.services.clone(), MediaRef::Movie(id(1)));

    vm.load().await;

    assert_eq!(vm.state().get().load, LoadState::Ready);
    assert!(h.transport.requests_to(Method::Get, "/ratings/").is_empty());
    assert!(vm.rate(8).await.is_err());
}

#[tokio::test]
async fn detail_loads_rating_and_status() {
    let h = signed_in();
    detail_routes(&h);
    h.transport.get(
        "/ratings/",
        page(vec![json!({ "movie": id(1), "series": null, "rating": 9 })], 1),
    );
    h.transport.get(
        "/watch-status/",
        page(
            vec![json!({ "id": id(60), "movie": id(1), "series": null, "status": "watching" })],
            1,
        ),
    );
    let vm = DetailViewModel::new(h.app.services.clone(), MediaRef::Movie(id(1)));

    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.user_rating, Some(9));
    assert_eq!(state.status(), Some(WatchState::Watching));
    let reviews_call = &h.transport.requests_to(Method::Get, "/reviews/")[0];
    assert_eq!(
        query_param(reviews_call, "movie"),
        Some(id(1).to_string().as_str())
    );
}

#[tokio::test]
async fn status_change_updates_existing_record() {
    let h = signed_in();
    detail_routes(&h);
    h.transport.get("/ratings/", page(vec![], 0));
    h.transport.get(
        "/watch-status/",
        page(
            vec![json!({ "id": id(60), "movie": id(1), "series": null, "status": "planned" })],
            1,
        ),
    );
    let record_path = format!("/watch-status/{}/", id(60));
    h.transport.json(
        Method::Put,
        &record_path,
        200,
        json!({ "id": id(60), "movie": id(1), "series": null, "status": "watched" }),
    );
    let vm = DetailViewModel::new(h.app.services.clone(), MediaRef::Movie(id(1)));
    vm.load().await;

    vm.change_watch_status(WatchState::Watched).await.unwrap();

    assert_eq!(vm.state().get().status(), Some(WatchState::Watched));
    let put = &h.transport.requests_to(Method::Put, &record_path)[0];
    assert_eq!(
        body_json(put),
        json!({ "movie": id(1), "status": "watched" })
    );
    assert!(h.transport.requests_to(Method::Post, "/watch-status/").is_empty());
}

#[tokio::test]
async fn detail_ignores_other_users_records() {
    let h = signed_in();
    detail_routes(&h);
    h.transport.get(
        "/ratings/",
        page(
            vec![
                json!({ "user": id(901), "movie": id(1), "series": null, "rating": 3 }),
                json!({ "user": id(900), "movie": id(1), "series": null, "rating": 9 }),
            ],
            2,
        ),
    );
    h.transport.get(
        "/watch-status/",
        page(
            vec![
                json!({ "id": id(61), "user": id(901), "movie": id(1), "series": null, "status": "watched" }),
                json!({ "id": id(60), "user": id(900), "movie": id(1), "series": null, "status": "planned" }),
            ],
            2,
        ),
    );
    let own_path = format!("/watch-status/{}/", id(60));
    h.transport.json(
        Method::Put,
        &own_path,
        200,
        json!({ "id": id(60), "user": id(900), "movie": id(1), "series": null, "status": "watching" }),
    );
    let vm = DetailViewModel::new(h.app.services.clone(), MediaRef::Movie(id(1)));
    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.user_rating, Some(9));
    assert_eq!(state.status(), Some(WatchState::Planned));

    vm.change_watch_status(WatchState::Watching).await.unwrap();

    assert_eq!(h.transport.requests_to(Method::Put, &own_path).len(), 1);
    let other_path = format!("/watch-status/{}/", id(61));
    assert!(h.transport.requests_to(Method::Put, &other_path).is_empty());
}

#[tokio::test]
async fn status_change_creates_when_missing() {
    let h = signed_in();
    h.transport.json(
        Method::Post,
        "/watch-status/",
        201,
        json!({ "id": id(61), "movie": null, "series": id(5), "status": "planned" }),
    );
    let vm = DetailViewModel::new(h.app.services.clone(), MediaRef::Series(id(5)));

    vm.change_watch_status(WatchState::Planned).await.unwrap();

    let record = vm.state().get().watch_status.unwrap();
    assert_eq!(record.id, id(61));
    let post = &h.transport.requests_to(Method::Post, "/watch-status/")[0];
    assert_eq!(
        body_json(post),
        json!({ "series": id(5), "status": "planned" })
    );
}

#[tokio::test]
async fn rating_is_confirmed_before_it_shows() {
    let h = signed_in();
    h.transport
        .json(Method::Post, "/ratings/", 400, json!({ "rating": ["Invalid."] }));
    let vm = DetailViewModel::new(h.app.services.clone(), MediaRef::Movie(id(1)));

    let err = vm.rate(7).await.unwrap_err();
    assert_eq!(err.field("rating"), Some("Invalid."));
    assert_eq!(vm.state().get().user_rating, None);

    assert!(vm.rate(11).await.is_err());
    assert!(vm.rate(0).await.is_err());
    assert_eq!(h.transport.requests().len(), 1);

    h.transport.json(
        Method::Post,
        "/ratings/",
        201,
        json!({ "movie": id(1), "series": null, "rating": 7 }),
    );
    vm.rate(7).await.unwrap();
    assert_eq!(vm.state().get().user_rating, Some(7));
}

#[tokio::test]
async fn reviews_are_prepended_and_removed() {
    let h = signed_in();
    detail_routes(&h);
    h.transport.get("/ratings/", page(vec![], 0));
    h.transport.get("/watch-status/", page(vec![], 0));
    h.transport.json(
        Method::Post,
        "/reviews/",
        201,
        review_json(11, 1, "Even better the second time."),
    );
    h.transport
        .json(Method::Delete, &format!("/reviews/{}/", id(10)), 204, json!(null));
    let vm = DetailViewModel::new(h.app.services.clone(), MediaRef::Movie(id(1)));
    vm.load().await;

    assert!(vm.submit_review("   ").await.is_err());
    vm.submit_review("  Even better the second time.  ").await.unwrap();

    let sent = body_json(&h.transport.requests_to(Method::Post, "/reviews/")[0]);
    assert_eq!(
        sent,
        json!({ "movie": id(1), "text": "Even better the second time." })
    );
    let reviews = vm.state().get().reviews;
    assert_eq!(reviews[0].id, id(11));
    assert_eq!(reviews[1].id, id(10));

    vm.delete_review(id(10)).await.unwrap();
    let reviews = vm.state().get().reviews;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].id, id(11));
}

#[tokio::test]
async fn edited_review_replaces_the_original() {
    let h = signed_in();
    detail_routes(&h);
    h.transport.get("/ratings/", page(vec![], 0));
    h.transport.get("/watch-status/", page(vec![], 0));
    let mut edited = review_json(10, 1, "Tense, and the score is great.");
    edited["updated_at"] = json!("2024-06-01T08:00:00Z");
    h.transport
        .json(Method::Put, &format!("/reviews/{}/", id(10)), 200, edited);
    let vm = DetailViewModel::new(h.app.services.clone(), MediaRef::Movie(id(1)));
    vm.load().await;

    assert!(vm.update_review(id(10), "").await.is_err());
    assert!(h.transport.requests_to(Method::Put, &format!("/reviews/{}/", id(10))).is_empty());

    vm.update_review(id(10), " Tense, and the score is great. ").await.unwrap();

    let sent = &h.transport.requests_to(Method::Put, &format!("/reviews/{}/", id(10)))[0];
    assert_eq!(body_json(sent), json!({ "text": "Tense, and the score is great." }));
    let reviews = vm.state().get().reviews;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].text, "Tense, and the score is great.");
    assert_eq!(reviews[0].updated_at, "2024-06-01T08:00:00Z");
}

// ── Watch list ──

fn status(n: u128, target: serde_json::Value, state: &str) -> serde_json::Value {
    let mut record = json!({ "id": id(n), "movie": null, "series": null, "status": state });
    for (key, value) in target.as_object().unwrap() {
        record[key] = value.clone();
    }
    record
}

#[tokio::test]
async fn watch_list_dedups_and_buckets() {
    let h = signed_in();
    h.transport.get(
        "/watch-status/",
        page(
            vec![
                status(100, json!({ "movie": id(1) }), "watching"),
                status(101, json!({ "movie": id(1) }), "watched"),
                status(102, json!({ "series": id(2) }), "planned"),
                status(103, json!({ "movie": id(3) }), "watched"),
                status(104, json!({ "movie": id(4) }), "planned"),
            ],
            5,
        ),
    );
    h.transport.get(&format!("/movies/{}/", id(1)), movie_json(1, "Heat"));
    h.transport.get(&format!("/series/{}/", id(2)), series_json(2, "Dark"));
    h.transport.get(&format!("/movies/{}/", id(3)), movie_json(3, "Ronin"));
    let vm = WatchListViewModel::new(h.app.services.clone());

    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(state.movies.watching.len(), 1);
    assert_eq!(state.movies.watching[0].title, "Heat");
    assert_eq!(state.movies.watched.len(), 1);
    assert_eq!(state.movies.watched[0].title, "Ronin");
    assert_eq!(state.series.planned[0].title, "Dark");
    // movie 4 is a 404 and is left out
    assert!(state.movies.planned.is_empty());
}

#[tokio::test]
async fn watch_list_shows_only_own_records() {
    let h = signed_in();
    let mut foreign = status(100, json!({ "movie": id(1) }), "watching");
    foreign["user"] = json!(id(901));
    let mut own = status(101, json!({ "movie": id(3) }), "watching");
    own["user"] = json!(id(900));
    h.transport.get("/watch-status/", page(vec![foreign, own], 2));
    h.transport.get(&format!("/movies/{}/", id(1)), movie_json(1, "Heat"));
    h.transport.get(&format!("/movies/{}/", id(3)), movie_json(3, "Ronin"));
    let vm = WatchListViewModel::new(h.app.services.clone());

    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.movies.watching.len(), 1);
    assert_eq!(state.movies.watching[0].title, "Ronin");
    assert!(h
        .transport
        .requests_to(Method::Get, &format!("/movies/{}/", id(1)))
        .is_empty());
}

#[tokio::test]
async fn watch_list_fails_without_statuses() {
    let h = signed_in();
    h.transport
        .json(Method::Get, "/watch-status/", 500, json!("Internal Server Error"));
    let vm = WatchListViewModel::new(h.app.services.clone());

    vm.load().await;

    assert_eq!(
        vm.state().get().load,
        LoadState::Errored("Internal Server Error".into())
    );
}

// ── Admin ──

fn admin_routes(h: &Harness) {
    h.transport.get(
        "/movies/",
        page(vec![movie_json(1, "Heat"), movie_json(2, "Ronin")], 2),
    );
    h.transport.get("/series/", page(vec![series_json(3, "Dark")], 1));
}

#[tokio::test]
async fn admin_loads_both_lists() {
    let h = signed_in();
    admin_routes(&h);
    let vm = AdminViewModel::new(h.app.services.clone());

    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.movies.len(), 2);
    assert_eq!(state.series.len(), 1);
    for path in ["/movies/", "/series/"] {
        let call = &h.transport.requests_to(Method::Get, path)[0];
        assert_eq!(query_param(call, "page_size"), Some("100"));
    }
}

#[tokio::test]
async fn admin_fails_when_either_list_fails() {
    let h = signed_in();
    admin_routes(&h);
    h.transport
        .json(Method::Get, "/series/", 500, json!({ "detail": "boom" }));
    let vm = AdminViewModel::new(h.app.services.clone());

    vm.load().await;

    assert_eq!(vm.state().get().load.error(), Some("boom"));
}

#[tokio::test]
async fn admin_delete_waits_for_confirmation() {
    let h = signed_in();
    admin_routes(&h);
    let path = format!("/movies/{}/", id(1));
    h.transport
        .json(Method::Delete, &path, 403, json!({ "detail": "Not allowed." }));
    let vm = AdminViewModel::new(h.app.services.clone());
    vm.load().await;

    let err = vm.delete_movie(id(1)).await.unwrap_err();
    assert_eq!(err.message, "Not allowed.");
    assert_eq!(vm.state().get().movies.len(), 2);

    h.transport.json(Method::Delete, &path, 204, json!(null));
    vm.delete_movie(id(1)).await.unwrap();
    let movies = vm.state().get().movies;
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, id(2));
}

#[tokio::test]
async fn admin_save_reloads_everything() {
    let h = signed_in();
    admin_routes(&h);
    h.transport
        .json(Method::Post, "/movies/", 201, movie_json(9, "Collateral"));
    let vm = AdminViewModel::new(h.app.services.clone());
    vm.load().await;

    let form = MovieForm {
        title: "Collateral".into(),
        description: String::new(),
        release_year: 2004,
        duration: 120,
        genres: vec![id(1)],
    };
    vm.save_movie(None, &form).await.unwrap();

    assert_eq!(h.transport.requests_to(Method::Get, "/movies/").len(), 2);
    assert_eq!(h.transport.requests_to(Method::Get, "/series/").len(), 2);
}

#[tokio::test]
async fn admin_genres_fall_back_to_harvest() {
    let h = signed_in();
    admin_routes(&h);
    h.transport
        .reply(Method::Get, "/genres/", Reply::Fail("offline".into()));
    let vm = AdminViewModel::new(h.app.services.clone());
    vm.load().await;

    vm.load_genres().await;

    let genres = vm.state().get().genres;
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Drama");
}

// ── Recommendations ──

#[tokio::test]
async fn recommendations_fall_back_to_popular() {
    let h = signed_in();
    h.transport.get("/recommendations/", page(vec![], 0));
    h.transport
        .get("/movies/popular/", page(vec![movie_json(1, "Heat")], 1));
    h.transport.get("/movies/", page(vec![movie_json(2, "New")], 1));
    let vm = RecommendationsViewModel::new(h.app.services.clone());

    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.load, LoadState::Ready);
    assert!(state.is_fallback());
    assert_eq!(state.for_you()[0].title, "Heat");

    vm.select_tab(PersonalizedTab::New);
    assert_eq!(vm.state().get().visible()[0].title, "New");

    let newest = &h.transport.requests_to(Method::Get, "/movies/")[0];
    assert_eq!(query_param(newest, "ordering"), Some("-created_at"));
    assert_eq!(query_param(newest, "page_size"), Some("12"));
}

#[tokio::test]
async fn recommendations_keep_what_arrived() {
    let h = signed_in();
    h.transport
        .json(Method::Get, "/recommendations/", 500, json!({ "detail": "boom" }));
    h.transport
        .get("/movies/popular/", page(vec![movie_json(1, "Heat")], 1));
    h.transport.get("/movies/", page(vec![], 0));
    let vm = RecommendationsViewModel::new(h.app.services.clone());

    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.load.error(), Some("boom"));
    assert_eq!(state.popular.len(), 1);
}

// ── Profile ──

#[tokio::test]
async fn profile_shows_own_reviews() {
    let h = signed_in();
    h.transport.get("/user/stats/", json!({ "total_watched": 2 }));
    let mut foreign = review_json(21, 1, "Not mine");
    foreign["user"] = json!(id(901));
    h.transport.get(
        "/reviews/",
        page(vec![review_json(20, 1, "Mine"), foreign], 2),
    );
    let vm = ProfileViewModel::new(h.app.services.clone());

    vm.load().await;

    let state = vm.state().get();
    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(state.stats.unwrap().total_watched, 2);
    assert_eq!(state.reviews.len(), 1);
    assert_eq!(state.reviews[0].text, "Mine");
}

#[tokio::test]
async fn profile_requires_stats() {
    let h = signed_in();
    h.transport
        .reply(Method::Get, "/user/stats/", Reply::Fail("offline".into()));
    let vm = ProfileViewModel::new(h.app.services.clone());

    vm.load().await;

    assert!(vm.state().get().load.error().is_some());
    assert!(h.transport.requests_to(Method::Get, "/reviews/").is_empty());
}
