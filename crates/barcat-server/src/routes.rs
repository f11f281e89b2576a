//! Router and handler functions of the cocktail API.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use barcat_common::{Cocktail, OpsSummary};

use crate::error::ApiError;
use crate::service::CocktailService;

/// Build the application router.
pub fn router(service: CocktailService) -> Router {
    Router::new()
        .route("/cocktails", get(get_all))
        .route("/cocktails/:class/:job_budget/:per_worker", get(get_bounded))
        .route("/cocktail/updatedb", get(update_catalog))
        .route("/cocktail/:filter/:value", get(get_filtered))
        .with_state(service)
}

/// GET /cocktails
async fn get_all(
    State(service): State<CocktailService>,
) -> Result<Json<Vec<Cocktail>>, ApiError> {
    Ok(Json(service.get_all().await?))
}

/// GET /cocktail/:filter/:value
async fn get_filtered(
    State(service): State<CocktailService>,
    Path((filter, value)): Path<(String, String)>,
) -> Result<Json<Vec<Cocktail>>, ApiError> {
    Ok(Json(service.get_filtered(&filter, &value).await?))
}

/// GET /cocktails/:class/:job_budget/:per_worker
async fn get_bounded(
    State(service): State<CocktailService>,
    Path((class, job_budget, per_worker)): Path<(String, String, String)>,
) -> Result<Json<Vec<Cocktail>>, ApiError> {
    Ok(Json(
        service.get_bounded(&class, &job_budget, &per_worker).await?,
    ))
}

/// GET /cocktail/updatedb
async fn update_catalog(
    State(service): State<CocktailService>,
) -> Result<Json<OpsSummary>, ApiError> {
    Ok(Json(service.update_catalog().await?))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use barcat_catalog::CatalogStore;
    use barcat_common::{time, Ingredient};

    use super::*;

    fn cocktail(id: i64, name: &str) -> Cocktail {
        Cocktail {
            id,
            name: name.to_string(),
            alcoholic: "Alcoholic".to_string(),
            category: "Ordinary Drink".to_string(),
            ingredients: vec![Ingredient {
                name: "Gin".to_string(),
                measure: "1 oz ".to_string(),
            }],
            instructions: "Mix and serve.".to_string(),
            glass: "Cocktail glass".to_string(),
            iba: String::new(),
            img_attribution: String::new(),
            img_src: String::new(),
            tags: String::new(),
            thumb: String::new(),
            video: String::new(),
            src_date: time::parse_date_time("2016-11-04 09:52:06").unwrap(),
            created_at: time::parse_date_time("2023-10-01 00:33:47").unwrap(),
            updated_at: time::parse_date_time("2023-10-01 00:33:47").unwrap(),
        }
    }

    async fn test_router() -> (Router, TempDir, MockServer) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "drinks": [] })),
            )
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let store = CatalogStore::connect(dir.path().join("cocktails.csv"), server.uri())
            .await
            .unwrap();
        store
            .replace_all(&[cocktail(1, "Margarita"), cocktail(2, "Mojito")])
            .await
            .unwrap();

        (router(CocktailService::new(store)), dir, server)
    }

    async fn get_json(
        router: Router,
        uri: &str,
    ) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn test_get_all_route() {
        let (router, _dir, _server) = test_router().await;
        let (status, body) = get_json(router, "/cocktails").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["name"], "Margarita");
    }

    #[tokio::test]
    async fn test_get_filtered_route() {
        let (router, _dir, _server) = test_router().await;
        let (status, body) = get_json(router, "/cocktail/name/moji").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], 2);
    }

    #[tokio::test]
    async fn test_get_filtered_route_rejects_unknown_filter() {
        let (router, _dir, _server) = test_router().await;
        let (status, body) = get_json(router, "/cocktail/color/blue").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], 422);
        assert_eq!(body["status"], "ServiceFilterError");
        assert_eq!(body["message"], "service filter: invalid filter");
    }

    #[tokio::test]
    async fn test_get_bounded_route() {
        let (router, _dir, _server) = test_router().await;
        let (status, body) = get_json(router, "/cocktails/even/4/2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], 2);
    }

    #[tokio::test]
    async fn test_get_bounded_route_rejects_bad_args() {
        let (router, _dir, _server) = test_router().await;

        let (status, body) = get_json(router.clone(), "/cocktails/prime/4/2").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], "ServiceArgumentsError");

        let (status, body) = get_json(router, "/cocktails/even/4/9").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], "ServiceArgumentsError");
        assert_eq!(
            body["message"],
            "service arguments: jobs per worker higher than the job budget"
        );
    }

    #[tokio::test]
    async fn test_update_catalog_route() {
        let (router, _dir, _server) = test_router().await;
        let (status, body) = get_json(router, "/cocktail/updatedb").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no changes");
        assert_eq!(body["totalOps"], 0);
        assert_eq!(body["totalRecs"], 2);
    }
}
