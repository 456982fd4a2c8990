#[macro_export]
macro_rules! routes {
    {@entry $dispatcher:expr, ANY, $pattern:expr, $handler:expr} => {
        if let Err(e) = $dispatcher.any($pattern, $handler) {
            panic!("{}: pattern = {:?}", e, $pattern);
        }
    };
    {@entry $dispatcher:expr, $method:tt, $pattern:expr, $handler:expr} => {
        if let Err(e) = $dispatcher.route(Some(stringify!($method)), $pattern, $handler) {
            panic!("{}: pattern = {:?}", e, $pattern);
        }
    };

    {$($method:tt $pattern:expr => $handler:expr),+ $(,)?} => {{
        let mut __dispatcher = $crate::Dispatcher::new();
        $($crate::routes!(@entry __dispatcher, $method, $pattern, $handler);)+
        __dispatcher
    }};
}
