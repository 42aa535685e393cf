use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, Pat};

/// Time a system when the `perf_stats` feature is enabled.
///
/// Wraps the function body with a guard that logs its duration on exit.
/// Expands to the untouched function when `perf_stats` is disabled.
///
/// - Detects a `frame: Res<FrameCount>` parameter and then also logs every
///   600 frames, not only slow runs
/// - Slow means longer than the threshold, 1 ms unless given
///
/// # Example
/// ```ignore
/// #[profile]
/// fn draw_surfaces(frame: Res<FrameCount>, mut gizmos: Gizmos) {
///     // ...
/// }
///
/// #[profile(4)] // 4 ms threshold
/// fn rebuild() { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn profile(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let threshold_ms: u128 = if attr.is_empty() {
        1
    } else {
        attr.to_string().parse().unwrap_or(1)
    };

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;
    let fn_name_str = sig.ident.to_string();

    let has_frame_param = sig.inputs.iter().any(|arg| {
        let FnArg::Typed(pat_type) = arg else { return false };
        let Pat::Ident(pat_ident) = &*pat_type.pat else { return false };
        if pat_ident.ident != "frame" {
            return false;
        }
        let ty = &pat_type.ty;
        quote!(#ty).to_string().contains("FrameCount")
    });

    let guard = if has_frame_param {
        quote! {
            struct ProfileGuard {
                name: &'static str,
                start: std::time::Instant,
                frame: u32,
            }
            impl Drop for ProfileGuard {
                fn drop(&mut self) {
                    let elapsed = self.start.elapsed();
                    if elapsed.as_millis() > #threshold_ms || self.frame % 600 == 0 {
                        bevy::prelude::info!("[PERF] {} (frame {}): {:?}", self.name, self.frame, elapsed);
                    }
                }
            }
            ProfileGuard {
                name: #fn_name_str,
                start: std::time::Instant::now(),
                frame: frame.0,
            }
        }
    } else {
        quote! {
            struct ProfileGuard {
                name: &'static str,
                start: std::time::Instant,
            }
            impl Drop for ProfileGuard {
                fn drop(&mut self) {
                    let elapsed = self.start.elapsed();
                    if elapsed.as_millis() > #threshold_ms {
                        bevy::prelude::info!("[PERF] {}: {:?}", self.name, elapsed);
                    }
                }
            }
            ProfileGuard {
                name: #fn_name_str,
                start: std::time::Instant::now(),
            }
        }
    };

    let output = quote! {
        #(#attrs)*
        #vis #sig {
            #[cfg(feature = "perf_stats")]
            let _profile_timer = {
                #guard
            };

            #block
        }
    };

    output.into()
}
