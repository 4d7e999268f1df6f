use crate::types::report::{Category, CategoryScore, Effort, Issue, IssueCategory, Severity};
use crate::types::scoring::{
    clamp_score, COOKIE_EXPIRY_PENALTY, COOKIE_HTTP_ONLY_PENALTY, COOKIE_SAME_SITE_PENALTY,
    COOKIE_SECURE_PENALTY, CSP_UNSAFE_PENALTY, REQUIRED_CSP_DIRECTIVES, SECURITY_HEADER_POINTS,
    SECURITY_WEIGHTS, VULN_PATTERN_PENALTY, XSS_DISABLED_HEADER_PENALTY,
    XSS_MISSING_HEADER_PENALTY, XSS_WEAK_CSP_PENALTY,
};
use crate::types::signals::{CspSignals, SecuritySignals, SignalRecord, XssProtection};
use std::collections::{BTreeMap, BTreeSet};

pub fn security_score(record: &SignalRecord) -> CategoryScore {
    let mut issues = Vec::new();
    let security = &record.security;

    let https = https_score(record, &mut issues);
    let headers = header_score(security, &mut issues);
    let cookies = cookie_score(security, &mut issues);
    let csp = csp_score(security.csp.as_ref(), &mut issues);
    let xss = xss_score(security, &mut issues);
    let vuln = vulnerability_score(security, &mut issues);

    let [w_https, w_headers, w_cookies, w_csp, w_xss, w_vuln] = SECURITY_WEIGHTS;
    let score = https * w_https
        + headers * w_headers
        + cookies * w_cookies
        + csp * w_csp
        + xss * w_xss
        + vuln * w_vuln;

    let mut subscores = BTreeMap::new();
    subscores.insert("https".to_string(), https);
    subscores.insert("headers".to_string(), headers);
    subscores.insert("cookies".to_string(), cookies);
    subscores.insert("csp".to_string(), csp);
    subscores.insert("xss".to_string(), xss);
    subscores.insert("vulnerabilities".to_string(), vuln);

    CategoryScore {
        category: Category::Security,
        score: clamp_score(score),
        subscores,
        issues,
        manual_checks: Vec::new(),
    }
}

fn https_score(record: &SignalRecord, issues: &mut Vec<Issue>) -> f64 {
    if record.https {
        return 100.0;
    }
    issues.push(Issue {
        severity: Severity::Critical,
        category: IssueCategory::Transport,
        message: "Page is served over an insecure scheme".to_string(),
        recommendation: "Serve the page over HTTPS and redirect HTTP traffic".to_string(),
        effort: Effort::Moderate,
        source: Some(record.url.clone()),
    });
    0.0
}

fn header_score(security: &SecuritySignals, issues: &mut Vec<Issue>) -> f64 {
    let present: BTreeSet<String> = security
        .headers
        .iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();

    let mut score = 0.0;
    for (header, points) in SECURITY_HEADER_POINTS {
        if present.contains(header) {
            score += points;
        } else {
            issues.push(Issue {
                severity: Severity::Moderate,
                category: IssueCategory::SecurityHeaders,
                message: format!("Missing security header: {header}"),
                recommendation: format!("Send the {header} response header"),
                effort: Effort::Low,
                source: Some(header.to_string()),
            });
        }
    }
    score
}

fn cookie_score(security: &SecuritySignals, issues: &mut Vec<Issue>) -> f64 {
    let mut score = 100.0;
    for cookie in &security.cookies {
        let mut missing = Vec::new();
        if !cookie.secure {
            score -= COOKIE_SECURE_PENALTY;
            missing.push("Secure");
        }
        if !cookie.http_only {
            score -= COOKIE_HTTP_ONLY_PENALTY;
            missing.push("HttpOnly");
        }
        if !cookie.same_site {
            score -= COOKIE_SAME_SITE_PENALTY;
            missing.push("SameSite");
        }
        if !cookie.has_expiry {
            score -= COOKIE_EXPIRY_PENALTY;
            missing.push("an expiry");
        }
        if !missing.is_empty() {
            issues.push(Issue {
                severity: Severity::Moderate,
                category: IssueCategory::Cookies,
                message: format!("Cookie '{}' is missing {}", cookie.name, missing.join(", ")),
                recommendation: "Set Secure, HttpOnly, SameSite and an expiry on every cookie"
                    .to_string(),
                effort: Effort::Low,
                source: Some(cookie.name.clone()),
            });
        }
    }
    score.max(0.0)
}

fn csp_score(csp: Option<&CspSignals>, issues: &mut Vec<Issue>) -> f64 {
    let Some(csp) = csp else {
        issues.push(Issue {
            severity: Severity::Serious,
            category: IssueCategory::ContentSecurityPolicy,
            message: "No Content-Security-Policy is served".to_string(),
            recommendation: "Define a CSP that restricts script and frame sources".to_string(),
            effort: Effort::Moderate,
            source: None,
        });
        return 0.0;
    };

    let present: BTreeSet<String> = csp
        .directives
        .iter()
        .map(|directive| directive.to_ascii_lowercase())
        .collect();
    let per_directive = 100.0 / REQUIRED_CSP_DIRECTIVES.len() as f64;

    let mut score = 100.0;
    for directive in REQUIRED_CSP_DIRECTIVES {
        if !present.contains(directive) {
            score -= per_directive;
        }
    }
    if csp.unsafe_inline {
        score -= CSP_UNSAFE_PENALTY;
        issues.push(Issue {
            severity: Severity::Serious,
            category: IssueCategory::ContentSecurityPolicy,
            message: "CSP allows unsafe-inline scripts".to_string(),
            recommendation: "Replace unsafe-inline with nonces or hashes".to_string(),
            effort: Effort::High,
            source: None,
        });
    }
    if csp.unsafe_eval {
        score -= CSP_UNSAFE_PENALTY;
        issues.push(Issue {
            severity: Severity::Serious,
            category: IssueCategory::ContentSecurityPolicy,
            message: "CSP allows unsafe-eval".to_string(),
            recommendation: "Remove unsafe-eval and the code paths that need it".to_string(),
            effort: Effort::High,
            source: None,
        });
    }
    score.max(0.0)
}

fn xss_score(security: &SecuritySignals, issues: &mut Vec<Issue>) -> f64 {
    let mut score = 100.0;
    match security.xss_protection {
        XssProtection::Missing => score -= XSS_MISSING_HEADER_PENALTY,
        XssProtection::Disabled => {
            score -= XSS_DISABLED_HEADER_PENALTY;
            issues.push(Issue {
                severity: Severity::Moderate,
                category: IssueCategory::XssProtection,
                message: "XSS protection header is explicitly disabled".to_string(),
                recommendation: "Remove the disabling header value and rely on a strict CSP"
                    .to_string(),
                effort: Effort::Low,
                source: None,
            });
        }
        XssProtection::Enabled => {}
    }
    let weak_csp = match &security.csp {
        None => true,
        Some(csp) => csp.unsafe_inline || csp.unsafe_eval,
    };
    if weak_csp {
        score -= XSS_WEAK_CSP_PENALTY;
    }
    score.max(0.0)
}

fn vulnerability_score(security: &SecuritySignals, issues: &mut Vec<Issue>) -> f64 {
    // Each pattern family counts once no matter how often it matched.
    let families: BTreeSet<&str> = security
        .vulnerability_patterns
        .iter()
        .map(String::as_str)
        .collect();
    for family in &families {
        issues.push(Issue {
            severity: Severity::Serious,
            category: IssueCategory::VulnerabilityPatterns,
            message: format!("Risky content pattern detected: {family}"),
            recommendation: "Audit the flagged markup and remove the risky construct".to_string(),
            effort: Effort::Moderate,
            source: Some((*family).to_string()),
        });
    }
    (100.0 - families.len() as f64 * VULN_PATTERN_PENALTY).max(0.0)
}
