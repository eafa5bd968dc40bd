use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Object, Promise, Reflect};
use newsletter::external::{ChallengeError, ChallengeProvider};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlScriptElement;

const SCRIPT_ID: &str = "recaptcha-api";
/// Widgets are rendered by hand into [`WIDGET_CONTAINER_ID`], so the script must not auto-render
pub const SCRIPT_URL: &str = "https://www.google.com/recaptcha/api.js?render=explicit";
/// Element the invisible widget is rendered into; the signup form provides it
pub const WIDGET_CONTAINER_ID: &str = "recaptcha-widget";

/// The promise handed out by the current `execute`, settled by the widget callbacks
struct Pending {
    resolve: Function,
    reject: Function,
}

#[derive(Default)]
struct WidgetState {
    id: RefCell<Option<JsValue>>,
    pending: RefCell<Option<Pending>>,
}

impl WidgetState {
    fn settle(&self, result: Result<JsValue, JsValue>) {
        let Some(pending) = self.pending.borrow_mut().take() else {
            return;
        };
        let _ = match result {
            Ok(token) => pending.resolve.call1(&JsValue::NULL, &token),
            Err(e) => pending.reject.call1(&JsValue::NULL, &e),
        };
    }
}

/// Invisible reCAPTCHA v2 widget, executed on demand
#[derive(Clone)]
pub struct Recaptcha {
    site_key: String,
    widget: Rc<WidgetState>,
}

impl std::fmt::Debug for Recaptcha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recaptcha")
            .field("site_key", &self.site_key)
            .field("rendered", &self.widget.id.borrow().is_some())
            .finish()
    }
}

impl Recaptcha {
    pub fn new(site_key: impl Into<String>) -> Self {
        Self {
            site_key: site_key.into(),
            widget: Rc::default(),
        }
    }

    /// Add the reCAPTCHA script to the page. Safe to call more than once.
    ///
    /// Without a site key nothing is loaded and every challenge fails as
    /// uninitialized.
    pub fn mount(&self) -> Result<(), JsValue> {
        if self.site_key.is_empty() {
            return Err(JsValue::from_str("RECAPTCHA_SITE_KEY is empty"));
        }

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        if document.get_element_by_id(SCRIPT_ID).is_some() {
            return Ok(());
        }

        let script: HtmlScriptElement = document
            .create_element("script")?
            .dyn_into()
            .map_err(JsValue::from)?;
        script.set_id(SCRIPT_ID);
        script.set_src(SCRIPT_URL);
        script.set_async(true);
        script.set_defer(true);

        let head = document
            .head()
            .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
        head.append_child(&script)?;
        Ok(())
    }

    /// Widget id, rendering the widget on first use
    fn widget_id(&self, grecaptcha: &JsValue) -> Result<JsValue, ChallengeError> {
        if let Some(id) = self.widget.id.borrow().as_ref() {
            return Ok(id.clone());
        }

        let container = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(WIDGET_CONTAINER_ID))
            .ok_or(ChallengeError::NotInitialized)?;

        let params = Object::new();
        set(&params, "sitekey", &JsValue::from_str(&self.site_key))?;
        set(&params, "size", &JsValue::from_str("invisible"))?;

        let widget = self.widget.clone();
        let on_token = Closure::<dyn FnMut(JsValue)>::new(move |token| widget.settle(Ok(token)));
        set(&params, "callback", &on_token.into_js_value())?;

        // An expired challenge yields no token, like a null executeAsync result
        let widget = self.widget.clone();
        let on_expired = Closure::<dyn FnMut()>::new(move || widget.settle(Ok(JsValue::NULL)));
        set(&params, "expired-callback", &on_expired.into_js_value())?;

        let widget = self.widget.clone();
        let on_error = Closure::<dyn FnMut()>::new(move || {
            widget.settle(Err(JsValue::from_str("reCAPTCHA reported an error")))
        });
        set(&params, "error-callback", &on_error.into_js_value())?;

        let id = call(grecaptcha, "render", &[container.into(), params.into()])?;
        *self.widget.id.borrow_mut() = Some(id.clone());
        Ok(id)
    }
}

/// `window.grecaptcha`, once the script has bound its `render` function
fn bound_grecaptcha() -> Option<JsValue> {
    let window = web_sys::window()?;
    let grecaptcha = Reflect::get(&window, &JsValue::from_str("grecaptcha")).ok()?;
    if grecaptcha.is_undefined() || grecaptcha.is_null() {
        return None;
    }
    Reflect::get(&grecaptcha, &JsValue::from_str("render"))
        .ok()?
        .is_function()
        .then_some(grecaptcha)
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), ChallengeError> {
    Reflect::set(target, &JsValue::from_str(key), value).map_err(rejected)?;
    Ok(())
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, ChallengeError> {
    let function = Reflect::get(target, &JsValue::from_str(method))
        .map_err(rejected)?
        .dyn_into::<Function>()
        .map_err(|_| ChallengeError::NotInitialized)?;
    let args: Array = args.iter().collect();
    Reflect::apply(&function, target, &args).map_err(rejected)
}

fn rejected(value: JsValue) -> ChallengeError {
    ChallengeError::Rejected(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl ChallengeProvider for Recaptcha {
    async fn execute(&self) -> Result<Option<String>, ChallengeError> {
        let grecaptcha = bound_grecaptcha().ok_or(ChallengeError::NotInitialized)?;
        let id = self.widget_id(&grecaptcha)?;

        // A previous challenge still waiting is abandoned in favour of this one
        self.widget.settle(Ok(JsValue::NULL));
        let token = Promise::new(&mut |resolve, reject| {
            *self.widget.pending.borrow_mut() = Some(Pending { resolve, reject });
        });

        call(&grecaptcha, "reset", &[id.clone()])?;
        if let Err(e) = call(&grecaptcha, "execute", &[id]) {
            self.widget.pending.borrow_mut().take();
            return Err(e);
        }

        let token = JsFuture::from(token).await.map_err(rejected)?;
        Ok(token.as_string())
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Stand-in for Google's script: one widget, `execute` answers through the
    /// registered callback on the next tick
    fn install_grecaptcha(answer: &str) {
        js_sys::eval(&format!(
            r#"
            window.grecaptchaCalls = [];
            window.grecaptcha = {{
                render: function (container, params) {{
                    window.grecaptchaParams = params;
                    window.grecaptchaCalls.push("render:" + container.id);
                    return 7;
                }},
                reset: function (id) {{ window.grecaptchaCalls.push("reset:" + id); }},
                execute: function (id) {{
                    window.grecaptchaCalls.push("execute:" + id);
                    setTimeout(function () {{ {answer} }}, 0);
                }},
            }};
            "#
        ))
        .unwrap();
    }

    fn add_container() {
        let document = web_sys::window().unwrap().document().unwrap();
        if document.get_element_by_id(WIDGET_CONTAINER_ID).is_none() {
            let container = document.create_element("div").unwrap();
            container.set_id(WIDGET_CONTAINER_ID);
            document.body().unwrap().append_child(&container).unwrap();
        }
    }

    fn global(name: &str) -> JsValue {
        Reflect::get(&web_sys::window().unwrap(), &JsValue::from_str(name)).unwrap()
    }

    #[wasm_bindgen_test]
    async fn executing_before_the_script_loads_is_not_initialized() {
        js_sys::eval("delete window.grecaptcha").unwrap();

        let result = Recaptcha::new("site-key").execute().await;

        assert_eq!(result, Err(ChallengeError::NotInitialized));
    }

    #[wasm_bindgen_test]
    async fn token_arrives_through_the_invisible_widget_callback() {
        add_container();
        install_grecaptcha("window.grecaptchaParams.callback('abc123')");
        let recaptcha = Recaptcha::new("site-key");

        let token = recaptcha.execute().await;

        assert_eq!(token, Ok(Some("abc123".to_string())));
        let params = global("grecaptchaParams");
        let field = |key: &str| Reflect::get(&params, &JsValue::from_str(key)).unwrap();
        assert_eq!(field("sitekey").as_string().as_deref(), Some("site-key"));
        assert_eq!(field("size").as_string().as_deref(), Some("invisible"));

        // the widget is rendered once and reused by id
        recaptcha.execute().await.unwrap();
        let calls: Vec<String> = Array::from(&global("grecaptchaCalls"))
            .iter()
            .filter_map(|call| call.as_string())
            .collect();
        assert_eq!(
            calls,
            vec![
                "render:recaptcha-widget",
                "reset:7",
                "execute:7",
                "reset:7",
                "execute:7",
            ]
        );
    }

    #[wasm_bindgen_test]
    async fn expired_challenge_yields_no_token() {
        add_container();
        install_grecaptcha("window.grecaptchaParams['expired-callback']()");

        let token = Recaptcha::new("site-key").execute().await;

        assert_eq!(token, Ok(None));
    }

    #[wasm_bindgen_test]
    async fn widget_error_is_a_rejection() {
        add_container();
        install_grecaptcha("window.grecaptchaParams['error-callback']()");

        let result = Recaptcha::new("site-key").execute().await;

        assert!(matches!(result, Err(ChallengeError::Rejected(_))));
    }
}
