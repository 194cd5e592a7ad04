// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::cluster::request::CreateRequest;
use crate::shared::error::KubeError;
use regex::Regex;
use std::sync::OnceLock;

const MAX_LABEL_LEN: usize = 63;

fn dns_label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("static DNS label pattern")
    })
}

/// RFC 1123 label: lowercase alphanumerics and '-', at most 63 characters.
pub fn is_valid_dns_label(name: &str) -> bool {
    name.len() <= MAX_LABEL_LEN && dns_label_regex().is_match(name)
}

/// Checks a create request locally so that bad input never reaches the API server.
pub fn validate_create_request(request: &CreateRequest) -> Result<(), KubeError> {
    let name = request.name();
    if !is_valid_dns_label(name) {
        return Err(KubeError::InvalidResource(format!(
            "{} name '{}' must be a lowercase RFC 1123 label (a-z, 0-9, '-', max {} chars)",
            request.kind(),
            name,
            MAX_LABEL_LEN
        )));
    }

    if let CreateRequest::Deployment {
        image, replicas, ..
    } = request
    {
        if image.trim().is_empty() || image.chars().any(char::is_whitespace) {
            return Err(KubeError::InvalidResource(format!(
                "Invalid container image: '{}'",
                image
            )));
        }

        if let Some(n) = replicas {
            if *n < 0 {
                return Err(KubeError::InvalidResource(format!(
                    "replicas must be >= 0, got {}",
                    n
                )));
            }
        }
    }

    Ok(())
}
