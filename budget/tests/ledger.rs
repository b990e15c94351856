mod common;

#[cfg(test)]
mod tests {
    use crate::common::{body_string, jwt, memory_store};
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{test, App};
    use budget::api::app::create_app;
    use budget::infra::repository::Store;
    use serde_json::{json, Value};

    async fn bearer(store: &Store, email: &str) -> String {
        let user = store
            .users
            .create_user(email.to_string(), None, "unused".to_string())
            .await
            .unwrap();
        format!("Bearer {}", jwt().gen_user_token(user.id).unwrap())
    }

    #[actix_web::test]
    async fn test_budget_flow_and_insights() {
        let store = memory_store();
        let alex = bearer(&store, "alex@example.com").await;
        let app = test::init_service(App::new().configure(create_app(store, jwt()))).await;

        let mut budget_ids = Vec::new();
        for (category, amount) in [("Food", 500), ("Bills", 100)] {
            let req = test::TestRequest::post()
                .insert_header((AUTHORIZATION, alex.clone()))
                .set_json(json!({"category": category, "amount": amount}))
                .uri("/budgets")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 201);
            let budget: Value = serde_json::from_str(&body_string(resp).await).unwrap();
            budget_ids.push(budget["id"].as_i64().unwrap());
        }

        let transactions = [
            json!({
                "description": "Grocery shopping",
                "amount": 120.50,
                "date": "2024-03-01",
                "category": "Food",
                "type": "expense"
            }),
            json!({
                "description": "Movie night",
                "amount": -30,
                "date": "2024-03-02",
                "category": "Food"
            }),
            json!({
                "description": "Electricity",
                "amount": 150,
                "date": "2024-04-04",
                "category": "Bills",
                "type": "EXPENSE"
            }),
            json!({
                "description": "Monthly salary",
                "amount": 5000,
                "date": "2024-03-01",
                "category": "Salary",
                "type": "income"
            }),
        ];
        let mut created = Vec::new();
        for body in transactions {
            let req = test::TestRequest::post()
                .insert_header((AUTHORIZATION, alex.clone()))
                .set_json(body)
                .uri("/transactions")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 201);
            created.push(serde_json::from_str::<Value>(&body_string(resp).await).unwrap());
        }
        assert_eq!(created[0]["amount"], -120.5);
        assert_eq!(created[0]["type"], "expense");
        assert_eq!(created[1]["type"], "expense");
        assert_eq!(created[2]["type"], "expense");
        assert_eq!(created[2]["amount"], -150.0);
        assert_eq!(created[3]["amount"], 5000.0);
        assert_eq!(created[3]["type"], "income");

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, alex.clone()))
            .uri("/transactions")
            .to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list[0]["description"], "Electricity");

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, alex.clone()))
            .uri("/insights/budgets")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        let usage: Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(usage[0]["category"], "Food");
        assert_eq!(usage[0]["usage"]["spent"], 150.5);
        assert_eq!(usage[0]["usage"]["percentage"], 30.1);
        assert_eq!(usage[0]["usage"]["status"], "safe");
        assert_eq!(usage[1]["usage"]["status"], "danger");

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, alex.clone()))
            .uri("/insights/dashboard")
            .to_request();
        let dashboard: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(dashboard["totals"]["income"], 5000.0);
        assert_eq!(dashboard["totals"]["expenses"], 300.5);
        assert_eq!(dashboard["totals"]["balance"], 4699.5);
        assert_eq!(dashboard["recent"].as_array().unwrap().len(), 4);
        assert_eq!(dashboard["overspent"][0]["category"], "Bills");
        assert_eq!(dashboard["overspent"][0]["overspent"], 50.0);

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, alex.clone()))
            .uri("/insights/overspent?limit=0")
            .to_request();
        let overspent: Value = test::call_and_read_body_json(&app, req).await;
        assert!(overspent.as_array().unwrap().is_empty());

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, alex.clone()))
            .uri("/insights/monthly?month=2&year=2024")
            .to_request();
        let march: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(march[0]["spent"], 150.5);
        assert_eq!(march[0]["remaining"], 349.5);
        assert_eq!(march[1]["spent"], 0.0);

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, alex.clone()))
            .uri("/insights/monthly?month=3&all_years=true")
            .to_request();
        let april: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(april[1]["spent"], 150.0);
        assert_eq!(april[1]["remaining"], -50.0);

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, alex.clone()))
            .uri("/insights/monthly?month=12&year=2024")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        // dropping the electricity bill clears the overspend
        let bill_id = created[2]["id"].as_i64().unwrap();
        let req = test::TestRequest::delete()
            .insert_header((AUTHORIZATION, alex.clone()))
            .uri(&format!("/transactions/{bill_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, alex.clone()))
            .uri("/insights/overspent")
            .to_request();
        let overspent: Value = test::call_and_read_body_json(&app, req).await;
        assert!(overspent.as_array().unwrap().is_empty());

        let req = test::TestRequest::put()
            .insert_header((AUTHORIZATION, alex.clone()))
            .set_json(json!({"category": "Food", "amount": 160}))
            .uri(&format!("/budgets/{}", budget_ids[0]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, alex))
            .uri("/insights/budgets")
            .to_request();
        let usage: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(usage[0]["amount"], 160.0);
        assert_eq!(usage[0]["usage"]["status"], "danger");
    }

    #[actix_web::test]
    async fn test_records_are_private() {
        let store = memory_store();
        let alex = bearer(&store, "alex@example.com").await;
        let sam = bearer(&store, "sam@example.com").await;
        let app = test::init_service(App::new().configure(create_app(store, jwt()))).await;

        let req = test::TestRequest::post()
            .insert_header((AUTHORIZATION, alex.clone()))
            .set_json(json!({"category": "Food", "amount": 500}))
            .uri("/budgets")
            .to_request();
        let budget: Value = test::call_and_read_body_json(&app, req).await;
        let budget_id = budget["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .insert_header((AUTHORIZATION, alex.clone()))
            .set_json(json!({
                "description": "Bus",
                "amount": -25,
                "date": "2024-03-03",
                "category": "Transportation"
            }))
            .uri("/transactions")
            .to_request();
        let tx: Value = test::call_and_read_body_json(&app, req).await;
        let tx_id = tx["id"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, sam.clone()))
            .uri("/budgets")
            .to_request();
        let budgets: Value = test::call_and_read_body_json(&app, req).await;
        assert!(budgets.as_array().unwrap().is_empty());

        let req = test::TestRequest::put()
            .insert_header((AUTHORIZATION, sam.clone()))
            .set_json(json!({"category": "Food", "amount": 1}))
            .uri(&format!("/budgets/{budget_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 403);

        let req = test::TestRequest::delete()
            .insert_header((AUTHORIZATION, sam.clone()))
            .uri(&format!("/budgets/{budget_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 403);

        let req = test::TestRequest::delete()
            .insert_header((AUTHORIZATION, sam.clone()))
            .uri(&format!("/transactions/{tx_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 403);

        let req = test::TestRequest::delete()
            .insert_header((AUTHORIZATION, sam))
            .uri("/transactions/9999")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
        assert_eq!(body_string(resp).await, "transaction not found");

        let req = test::TestRequest::delete()
            .insert_header((AUTHORIZATION, alex))
            .uri(&format!("/budgets/{budget_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
    }

    #[actix_web::test]
    async fn test_new_budget_counts_earlier_expenses() {
        let store = memory_store();
        let alex = bearer(&store, "alex@example.com").await;
        let app = test::init_service(App::new().configure(create_app(store, jwt()))).await;

        for (category, amount) in [("Food", -40.0), ("Food", -2.5), ("Bills", -90.0)] {
            let req = test::TestRequest::post()
                .insert_header((AUTHORIZATION, alex.clone()))
                .set_json(json!({
                    "description": "Earlier",
                    "amount": amount,
                    "date": "2024-03-01",
                    "category": category
                }))
                .uri("/transactions")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 201);
        }

        let req = test::TestRequest::post()
            .insert_header((AUTHORIZATION, alex.clone()))
            .set_json(json!({"category": "Food", "amount": 100}))
            .uri("/budgets")
            .to_request();
        let budget: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(budget["spent"], 42.5);
        let budget_id = budget["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .insert_header((AUTHORIZATION, alex.clone()))
            .set_json(json!({"category": "Bills", "amount": 100}))
            .uri(&format!("/budgets/{budget_id}"))
            .to_request();
        let budget: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(budget["spent"], 90.0);

        let req = test::TestRequest::get()
            .insert_header((AUTHORIZATION, alex))
            .uri("/insights/budgets")
            .to_request();
        let usage: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(usage[0]["spent"], usage[0]["usage"]["spent"]);
    }

    #[actix_web::test]
    async fn test_ledger_requires_token() {
        let store = memory_store();
        let app = test::init_service(App::new().configure(create_app(store, jwt()))).await;

        for uri in ["/budgets", "/transactions", "/insights/dashboard"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 401);
        }
    }
}
