//! Console interception installed ahead of any user code.
//!
//! The shim wraps the four console levels, forwarding each call to the host as a
//! `{ type, data, timestamp }` message while still calling the original method. It
//! also installs the global error trap: an uncaught exception is forwarded as
//! `CONSOLE_ERROR` and rendered as a visible block inside the document. The shim
//! never sends a generation; the host attributes messages to contexts.

const SHIM: &str = r#"(function () {
  var original = {};
  function serialize(arg) {
    if (arg instanceof Error) { return String(arg); }
    if (arg !== null && typeof arg === 'object') {
      try { return JSON.stringify(arg, null, 2); } catch (err) { return String(arg); }
    }
    return String(arg);
  }
  function post(level, args) {
    try {
      window.parent.postMessage({
        type: 'CONSOLE_' + level.toUpperCase(),
        data: Array.prototype.map.call(args, serialize).join(' '),
        timestamp: new Date().toISOString()
      }, '*');
    } catch (err) {}
  }
  ['log', 'error', 'warn', 'info'].forEach(function (level) {
    original[level] = console[level];
    console[level] = function () {
      original[level].apply(console, arguments);
      post(level, arguments);
    };
  });
  window.__previewRenderError = function (title, detail) {
    var host = document.getElementById('root') || document.body;
    if (!host) { return; }
    var block = document.createElement('div');
    block.className = 'preview-error';
    block.style.cssText = 'background:#ff4444;color:#fff;padding:20px;margin:20px;border-radius:8px;text-align:center;font-family:sans-serif;';
    var heading = document.createElement('h3');
    heading.textContent = title;
    var body = document.createElement('p');
    body.textContent = detail;
    block.appendChild(heading);
    block.appendChild(body);
    if (host.id === 'root') { host.innerHTML = ''; }
    host.appendChild(block);
  };
  window.addEventListener('error', function (event) {
    var detail = String(event.error || event.message || 'Unknown error occurred');
    post('error', ['Uncaught ' + detail]);
    window.__previewRenderError('Runtime Error', detail);
  });
})();"#;

/// `<script>` element carrying the console shim and error trap
pub(super) fn shim_block() -> String {
    let mut out = String::with_capacity(SHIM.len() + 20);
    out.push_str("<script>\n");
    out.push_str(SHIM);
    out.push_str("\n</script>\n");
    out
}
