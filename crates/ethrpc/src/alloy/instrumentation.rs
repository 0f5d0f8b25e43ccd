//! Alloy transport layer that makes RPC traffic visible in the logs.
use {
    alloy::{
        rpc::json_rpc::{RequestPacket, ResponsePacket},
        transports::TransportError,
    },
    std::{
        fmt::Debug,
        pin::Pin,
        task::{Context, Poll},
        time::Instant,
    },
    tower::{Layer, Service},
};

/// Layer that logs every request with the label of the client that sent it,
/// together with its outcome and duration.
pub(crate) struct InstrumentationLayer {
    pub label: String,
}

impl<S> Layer<S> for InstrumentationLayer {
    type Service = InstrumentedProvider<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InstrumentedProvider {
            inner,
            label: self.label.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct InstrumentedProvider<S> {
    inner: S,
    label: String,
}

impl<S> Service<RequestPacket> for InstrumentedProvider<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError>,
    S::Future: Send + 'static,
    S::Response: Send + 'static + Debug,
    S::Error: Send + 'static + Debug,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: RequestPacket) -> Self::Future {
        let component = self.label.clone();
        let methods: Vec<String> = req
            .requests()
            .iter()
            .map(|r| {
                tracing::trace!(component, ?r, "executing request");
                r.method().to_string()
            })
            .collect();

        if methods.len() > 1 {
            tracing::trace!(len = methods.len(), "executing batch request");
        }

        let start = Instant::now();
        let fut = self.inner.call(req);
        Box::pin(async move {
            let res = fut.await;
            let elapsed = start.elapsed();
            for method in &methods {
                match &res {
                    Ok(_) => tracing::debug!(component, method, ?elapsed, "rpc request completed"),
                    Err(err) => {
                        tracing::debug!(component, method, ?elapsed, ?err, "rpc request failed")
                    }
                }
            }
            res
        })
    }
}
