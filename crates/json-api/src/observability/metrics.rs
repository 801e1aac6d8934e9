//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use fernwood::checkout::PaymentMethod;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    sales_total: IntCounterVec,
    sales_revenue_minor_total: IntCounterVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a settled sale and its revenue in minor units.
pub(crate) fn record_sale(method: PaymentMethod, total_minor: u64) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .sales_total
        .with_label_values(&[method.as_str()])
        .inc();

    metrics
        .sales_revenue_minor_total
        .with_label_values(&[method.as_str()])
        .inc_by(total_minor);
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();

    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metric_families, &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    let content_type = match HeaderValue::from_str(encoder.format_type()) {
        Ok(value) => value,
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    res.headers_mut().insert(CONTENT_TYPE, content_type);
    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| match build_metrics() {
            Ok(metrics) => Some(metrics),
            Err(source) => {
                error!("failed to build metrics registry: {source}");
                None
            }
        })
        .as_ref()
}

fn build_metrics() -> Result<Metrics, prometheus::Error> {
    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new(
            "fernwood_json_http_requests_total",
            "Total HTTP requests partitioned by method, route, status class, and status code.",
        ),
        &["method", "route", "status_class", "status_code"],
    )?;

    let request_duration_seconds = HistogramVec::new(
        HistogramOpts::new(
            "fernwood_json_http_request_duration_seconds",
            "HTTP request duration in seconds partitioned by method and route.",
        )
        .buckets(vec![
            0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "route"],
    )?;

    let requests_in_flight = IntGauge::with_opts(Opts::new(
        "fernwood_json_http_requests_in_flight",
        "Current number of in-flight HTTP requests.",
    ))?;

    let sales_total = IntCounterVec::new(
        Opts::new(
            "fernwood_json_pos_sales_total",
            "Settled point of sale transactions by payment method.",
        ),
        &["method"],
    )?;

    let sales_revenue_minor_total = IntCounterVec::new(
        Opts::new(
            "fernwood_json_pos_revenue_minor_total",
            "Settled point of sale revenue in minor currency units by payment method.",
        ),
        &["method"],
    )?;

    registry.register(Box::new(requests_total.clone()))?;
    registry.register(Box::new(request_duration_seconds.clone()))?;
    registry.register(Box::new(requests_in_flight.clone()))?;
    registry.register(Box::new(sales_total.clone()))?;
    registry.register(Box::new(sales_revenue_minor_total.clone()))?;

    Ok(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        sales_total,
        sales_revenue_minor_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn metrics_endpoint_exposes_http_and_sales_metrics() -> TestResult {
        observe_request("GET", "/products", 200, 0.042);
        observe_request("POST", "/pos/checkout/process", 500, 1.6);
        record_sale(PaymentMethod::MobileMoney, 134_549);

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let response = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?;

        assert!(
            response.contains("fernwood_json_http_requests_total"),
            "expected requests_total metric in response"
        );
        assert!(
            response.contains("fernwood_json_http_request_duration_seconds"),
            "expected request_duration metric in response"
        );
        assert!(
            response.contains("fernwood_json_http_requests_in_flight"),
            "expected in-flight metric in response"
        );
        assert!(
            response.contains("fernwood_json_pos_sales_total{method=\"mobile_money\"}"),
            "expected a mobile money sale in response"
        );

        Ok(())
    }

    #[test]
    fn status_codes_are_grouped_by_class() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(409), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }
}
