use anyhow::{Context, Result, bail};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use super::RecordStore;
use crate::types::{ExerciseTemplate, WorkoutSession};

pub struct HttpStore {
    client: reqwest::Client,
    base: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct NewId {
    id: u64,
}

#[derive(Serialize)]
struct NamePayload<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewSessionPayload<'a> {
    name: &'a str,
    date: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppendExercisePayload<'a> {
    exercise_id: u64,
    weight: f64,
    reps: u32,
    sets: u32,
    comments: &'a str,
}

impl HttpStore {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, format!("{}{}", self.base, path));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Turn a non-2xx response into an error carrying the server's message.
    async fn checked(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        if body.is_empty() {
            bail!("store returned {status}");
        }
        bail!("store returned {status}: {body}");
    }

    async fn send(&self, req: RequestBuilder, what: &str) -> Result<Response> {
        let resp = req
            .send()
            .await
            .with_context(|| format!("Could not reach the record store ({what})"))?;
        Self::checked(resp).await
    }
}

impl RecordStore for HttpStore {
    async fn add_exercise(&self, name: &str) -> Result<u64> {
        let req = self.request(Method::POST, "/exercises").json(&NamePayload { name });
        let created: NewId = self.send(req, "add exercise").await?.json().await?;
        Ok(created.id)
    }

    async fn edit_exercise(&self, id: u64, new_name: &str) -> Result<()> {
        let req = self
            .request(Method::PUT, &format!("/exercises/{id}"))
            .json(&NamePayload { name: new_name });
        self.send(req, "rename exercise").await?;
        Ok(())
    }

    async fn delete_exercise(&self, id: u64) -> Result<()> {
        let req = self.request(Method::DELETE, &format!("/exercises/{id}"));
        self.send(req, "delete exercise").await?;
        Ok(())
    }

    async fn get_all_exercises(&self) -> Result<Vec<ExerciseTemplate>> {
        let req = self.request(Method::GET, "/exercises");
        Ok(self.send(req, "list exercises").await?.json().await?)
    }

    async fn create_workout_session(&self, name: &str, date: i64) -> Result<u64> {
        let req = self
            .request(Method::POST, "/sessions")
            .json(&NewSessionPayload { name, date });
        let created: NewId = self.send(req, "create session").await?.json().await?;
        Ok(created.id)
    }

    async fn add_exercise_to_session(
        &self,
        session_id: u64,
        exercise_id: u64,
        weight: f64,
        reps: u32,
        sets: u32,
        comments: &str,
    ) -> Result<()> {
        let req = self
            .request(Method::POST, &format!("/sessions/{session_id}/exercises"))
            .json(&AppendExercisePayload { exercise_id, weight, reps, sets, comments });
        self.send(req, "record exercise").await?;
        Ok(())
    }

    async fn remove_exercise_from_session(&self, session_id: u64, index: usize) -> Result<()> {
        let req = self.request(
            Method::DELETE,
            &format!("/sessions/{session_id}/exercises/{index}"),
        );
        self.send(req, "remove recorded exercise").await?;
        Ok(())
    }

    async fn get_workout_sessions_by_date(&self) -> Result<Vec<WorkoutSession>> {
        let req = self.request(Method::GET, "/sessions");
        Ok(self.send(req, "list sessions").await?.json().await?)
    }

    async fn get_workout_history(&self) -> Result<Vec<WorkoutSession>> {
        let req = self.request(Method::GET, "/sessions/history");
        Ok(self.send(req, "fetch history").await?.json().await?)
    }
}
