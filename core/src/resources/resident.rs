//! Endpoints for resident sessions: authentication, profile, wallet,
//! programs, certificates, real property and news.

use std::fmt::Display;

use serde::Serialize;
use serde_json::json;

use crate::client::{segment, ApiResult, Client};
use crate::resources::optional_id_path;
use crate::transport::Transport;

pub struct ResidentResource<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> ResidentResource<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    pub fn hello(&self) -> ApiResult {
        self.client.get("/resident/hello", &[])
    }

    // --- auth ---

    /// Exchange credentials for a token. The token is not stored; pass it
    /// to `Client::token` to use it.
    pub fn login(&self, username: &str, password: &str) -> ApiResult {
        self.client.post_json(
            "/auth/resident/login",
            &json!({"username": username, "password": password}),
        )
    }

    pub fn register<B: Serialize + ?Sized>(&self, resident: &B) -> ApiResult {
        self.client.post_json("/auth/resident/register", resident)
    }

    pub fn verify(&self, code: &str) -> ApiResult {
        self.client.post_json("/auth/resident/verify", &json!({"code": code}))
    }

    // --- profile ---

    pub fn get_profile(&self) -> ApiResult {
        self.client.get("/resident/profile", &[])
    }

    pub fn update_avatar(&self, avatar_url: &str) -> ApiResult {
        self.client
            .post_json("/resident/update_avatar", &json!({"avatar_url": avatar_url}))
    }

    // --- wallet ---

    pub fn get_wallet(&self) -> ApiResult {
        self.client.get("/resident/wallet", &[])
    }

    pub fn withdraw<B: Serialize + ?Sized>(&self, transaction: &B) -> ApiResult {
        self.client.post_json("/resident/wallet/withdraw", transaction)
    }

    pub fn get_transactions(&self) -> ApiResult {
        self.client.get("/resident/transactions", &[])
    }

    pub fn get_transaction(&self, reference_no: impl Display) -> ApiResult {
        self.client
            .get(&format!("/resident/transactions/{}", segment(reference_no)), &[])
    }

    // --- real property ---

    pub fn get_real_properties(&self) -> ApiResult {
        self.client.get("/resident/properties", &[])
    }

    pub fn get_real_property(&self, property_id: impl Display) -> ApiResult {
        self.client
            .get(&format!("/resident/properties/{}", segment(property_id)), &[])
    }

    pub fn pay_real_property<B: Serialize + ?Sized>(&self, property_id: impl Display, payment: &B) -> ApiResult {
        self.client.post_json(
            &format!("/resident/properties/{}/pay", segment(property_id)),
            payment,
        )
    }

    // --- news and notices ---

    pub fn get_news(&self, news_id: Option<u64>) -> ApiResult {
        self.client.get(&optional_id_path("/resident/news", news_id), &[])
    }

    pub fn get_announcements(&self) -> ApiResult {
        self.client.get("/resident/announcements", &[])
    }

    pub fn get_notifications(&self) -> ApiResult {
        self.client.get("/resident/notifications", &[])
    }

    pub fn get_external_services(&self) -> ApiResult {
        self.client.get("/resident/external_services", &[])
    }

    // --- programs and applications ---

    pub fn get_financial_aid(&self) -> ApiResult {
        self.client.get("/resident/programs/financial", &[])
    }

    pub fn get_reliefs(&self) -> ApiResult {
        self.client.get("/resident/programs/relief", &[])
    }

    pub fn get_disasters(&self) -> ApiResult {
        self.client.get("/resident/programs/disaster", &[])
    }

    pub fn get_program(&self, program_id: impl Display) -> ApiResult {
        self.client
            .get(&format!("/resident/programs/{}", segment(program_id)), &[])
    }

    /// Claim status for a program (GET). Submitting a claim is `claim`.
    pub fn claim_program(&self, program_id: impl Display) -> ApiResult {
        self.client
            .get(&format!("/resident/programs/{}/claim", segment(program_id)), &[])
    }

    pub fn claim<B: Serialize + ?Sized>(&self, program_id: impl Display, claim: &B) -> ApiResult {
        self.client.post_json(
            &format!("/resident/programs/{}/claim", segment(program_id)),
            claim,
        )
    }

    pub fn get_applications(&self) -> ApiResult {
        self.client.get("/resident/applications", &[])
    }

    pub fn get_disaster_applications(&self) -> ApiResult {
        self.client.get("/resident/applications/disaster", &[])
    }

    // --- certificates ---

    pub fn get_certificates(&self) -> ApiResult {
        self.client.get("/resident/certificates", &[])
    }

    pub fn get_certificate(&self, certificate_id: impl Display) -> ApiResult {
        self.client
            .get(&format!("/resident/certificates/{}", segment(certificate_id)), &[])
    }

    pub fn get_certificate_applications(&self) -> ApiResult {
        self.client.get("/resident/certificates/applications", &[])
    }

    pub fn apply_certificate<B: Serialize + ?Sized>(&self, certificate_id: impl Display, application: &B) -> ApiResult {
        self.client.post_json(
            &format!("/resident/certificates/{}/apply", segment(certificate_id)),
            application,
        )
    }

    /// The issued certificate as PDF bytes.
    pub fn download_certificate_application(&self, application_id: impl Display) -> ApiResult {
        self.client.get_binary(
            &format!(
                "/resident/certificates/applications/{}/download",
                segment(application_id)
            ),
            &[],
        )
    }
}
